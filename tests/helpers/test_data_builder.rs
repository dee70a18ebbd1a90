// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use skyops::domain::{
    Drone, DroneStatus, Mission, MissionPriority, Pilot, PilotStatus, WeatherForecast,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn tags(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

// ==========================================
// Pilot 构建器
// ==========================================

pub struct PilotBuilder {
    pilot: Pilot,
}

impl PilotBuilder {
    pub fn new(pilot_id: &str, name: &str) -> Self {
        Self {
            pilot: Pilot {
                pilot_id: pilot_id.to_string(),
                name: name.to_string(),
                skills: Vec::new(),
                certifications: Vec::new(),
                location: "Bangalore".to_string(),
                status: PilotStatus::Available,
                current_assignment: None,
                available_from: None,
                daily_rate_inr: 1500,
            },
        }
    }

    pub fn skills(mut self, skills: &[&str]) -> Self {
        self.pilot.skills = tags(skills);
        self
    }

    pub fn certs(mut self, certs: &[&str]) -> Self {
        self.pilot.certifications = tags(certs);
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.pilot.location = location.to_string();
        self
    }

    pub fn status(mut self, status: PilotStatus) -> Self {
        self.pilot.status = status;
        self
    }

    pub fn assigned_to(mut self, assignment: &str) -> Self {
        self.pilot.status = PilotStatus::Assigned;
        self.pilot.current_assignment = Some(assignment.to_string());
        self
    }

    pub fn on_leave_until(mut self, back: NaiveDate) -> Self {
        self.pilot.status = PilotStatus::OnLeave;
        self.pilot.available_from = Some(back);
        self
    }

    pub fn rate(mut self, daily_rate_inr: u64) -> Self {
        self.pilot.daily_rate_inr = daily_rate_inr;
        self
    }

    pub fn build(self) -> Pilot {
        self.pilot
    }
}

// ==========================================
// Drone 构建器
// ==========================================

pub struct DroneBuilder {
    drone: Drone,
}

impl DroneBuilder {
    pub fn new(drone_id: &str, model: &str) -> Self {
        Self {
            drone: Drone {
                drone_id: drone_id.to_string(),
                model: model.to_string(),
                capabilities: Vec::new(),
                status: DroneStatus::Available,
                location: "Bangalore".to_string(),
                current_assignment: None,
                maintenance_due: None,
                weather_resistance: "None".to_string(),
            },
        }
    }

    pub fn capabilities(mut self, caps: &[&str]) -> Self {
        self.drone.capabilities = tags(caps);
        self
    }

    pub fn status(mut self, status: DroneStatus) -> Self {
        self.drone.status = status;
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.drone.location = location.to_string();
        self
    }

    pub fn assigned_to(mut self, assignment: &str) -> Self {
        self.drone.status = DroneStatus::Assigned;
        self.drone.current_assignment = Some(assignment.to_string());
        self
    }

    pub fn maintenance_due(mut self, due: NaiveDate) -> Self {
        self.drone.maintenance_due = Some(due);
        self
    }

    pub fn rain_rated(mut self) -> Self {
        self.drone.weather_resistance = "IP43 (Rain)".to_string();
        self
    }

    pub fn build(self) -> Drone {
        self.drone
    }
}

// ==========================================
// Mission 构建器
// ==========================================

pub struct MissionBuilder {
    mission: Mission,
}

impl MissionBuilder {
    pub fn new(project_id: &str) -> Self {
        Self {
            mission: Mission {
                project_id: project_id.to_string(),
                client: "Client A".to_string(),
                location: "Bangalore".to_string(),
                required_skills: Vec::new(),
                required_certs: Vec::new(),
                start_date: date(2026, 2, 6),
                end_date: date(2026, 2, 8),
                priority: MissionPriority::Standard,
                budget_inr: 100_000,
                weather_forecast: WeatherForecast::Sunny,
            },
        }
    }

    pub fn client(mut self, client: &str) -> Self {
        self.mission.client = client.to_string();
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.mission.location = location.to_string();
        self
    }

    pub fn skills(mut self, skills: &[&str]) -> Self {
        self.mission.required_skills = tags(skills);
        self
    }

    pub fn certs(mut self, certs: &[&str]) -> Self {
        self.mission.required_certs = tags(certs);
        self
    }

    pub fn dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.mission.start_date = start;
        self.mission.end_date = end;
        self
    }

    pub fn priority(mut self, priority: MissionPriority) -> Self {
        self.mission.priority = priority;
        self
    }

    pub fn budget(mut self, budget_inr: u64) -> Self {
        self.mission.budget_inr = budget_inr;
        self
    }

    pub fn weather(mut self, weather: WeatherForecast) -> Self {
        self.mission.weather_forecast = weather;
        self
    }

    pub fn build(self) -> Mission {
        self.mission
    }
}
