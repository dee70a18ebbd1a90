// ==========================================
// 无人机作业协调系统 - 命令行入口
// ==========================================
// 数据来源: SKYOPS_DATA_DIR 下的 CSV,或 SKYOPS_SHEET_DB 表格存储
// 对话功能: 需设置 SKYOPS_LLM_API_KEY
// ==========================================

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use skyops::app::{AppState, MutationReport};
use skyops::domain::parse_flexible_date;
use skyops::engine::{DroneQuery, PilotQuery};
use skyops::sync::SyncNotice;
use tokio::io::{AsyncBufReadExt, BufReader};

const CLI_ACTOR: &str = "cli";

#[derive(Parser, Debug)]
#[command(name = "skyops")]
#[command(about = "SkyOps drone operations coordinator")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Dashboard KPIs
    Summary,
    /// Pilots currently on assignment
    Assignments,
    /// Full conflict sweep
    Conflicts,
    /// Drones with overdue or upcoming maintenance
    Maintenance {
        /// Reference date (default: today)
        #[arg(long)]
        today: Option<String>,
    },
    /// Filter the pilot roster
    Pilots {
        #[arg(long)]
        skill: Option<String>,
        #[arg(long)]
        certification: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Filter the drone fleet
    Drones {
        #[arg(long)]
        capability: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Mission weather; "Rainy" keeps only rain-capable drones
        #[arg(long)]
        weather: Option<String>,
    },
    /// Rank pilots for a mission
    MatchPilots { mission_id: String },
    /// Rank drones for a mission
    MatchDrones { mission_id: String },
    /// Replacement options for a mission
    Reassign { mission_id: String },
    /// Pilot cost for a date range, optionally against a mission budget
    Cost {
        pilot_id: String,
        start_date: Option<String>,
        end_date: Option<String>,
        #[arg(long)]
        mission: Option<String>,
    },
    AssignPilot { pilot_id: String, mission_id: String },
    AssignDrone { drone_id: String, mission_id: String },
    SetPilotStatus { pilot_id: String, status: String },
    SetDroneStatus { drone_id: String, status: String },
    /// Overwrite the sheet store with the loaded roster
    Push,
    /// Reload the roster from the sheet store and print the summary
    Pull,
    /// Talk to the assistant (interactive when no message is given)
    Chat { message: Option<String> },
}

#[tokio::main]
async fn main() -> Result<()> {
    skyops::logging::init();
    let args = Args::parse();

    tracing::info!(version = skyops::VERSION, "{} 启动", skyops::APP_NAME);
    let mut state = AppState::from_environment().context("failed to load roster")?;

    match args.command {
        Command::Summary => println!("{}", state.coordinator.dashboard_summary().render()),
        Command::Assignments => println!("{}", state.coordinator.render_current_assignments()),
        Command::Conflicts => println!("{}", state.coordinator.detect_conflicts().render()),
        Command::Maintenance { today } => {
            let today = match today {
                Some(raw) => parse_date_arg(&raw)?,
                None => Local::now().date_naive(),
            };
            for alert in state.coordinator.maintenance_alerts(today) {
                println!("{}", alert);
            }
        }
        Command::Pilots {
            skill,
            certification,
            location,
            status,
        } => {
            let query = PilotQuery {
                skill,
                certification,
                location,
                status,
            };
            for pilot in state.coordinator.query_pilots(&query) {
                println!(
                    "{} {} | {} | {} | {}",
                    pilot.pilot_id,
                    pilot.name,
                    pilot.location,
                    pilot.status,
                    pilot.current_assignment.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Drones {
            capability,
            status,
            location,
            weather,
        } => {
            let query = DroneQuery {
                capability,
                status,
                location,
                weather,
            };
            for drone in state.coordinator.query_drones(&query) {
                println!(
                    "{} {} | {} | {} | {}",
                    drone.drone_id,
                    drone.model,
                    drone.location,
                    drone.status,
                    drone.weather_resistance
                );
            }
        }
        Command::MatchPilots { mission_id } => {
            for c in state.coordinator.match_pilots(&mission_id)? {
                println!(
                    "{} {} | score {} | ₹{} | {} | {}",
                    c.pilot_id,
                    c.name,
                    c.score,
                    c.total_cost,
                    c.fit,
                    issues_text(&c.issues)
                );
            }
        }
        Command::MatchDrones { mission_id } => {
            for c in state.coordinator.match_drones(&mission_id)? {
                println!(
                    "{} {} | score {} | {} | {}",
                    c.drone_id,
                    c.model,
                    c.score,
                    c.fit,
                    issues_text(&c.issues)
                );
            }
        }
        Command::Reassign { mission_id } => {
            println!("{}", state.coordinator.plan_reassignment(&mission_id)?.render())
        }
        Command::Cost {
            pilot_id,
            start_date,
            end_date,
            mission,
        } => match (mission, start_date, end_date) {
            (Some(mission_id), _, _) => {
                let check = state.coordinator.check_pilot_budget(&pilot_id, &mission_id)?;
                println!("{}", check.summary());
            }
            (None, Some(start), Some(end)) => {
                let quote = state.coordinator.calculate_pilot_cost(&pilot_id, &start, &end)?;
                println!("{}", quote.breakdown);
            }
            _ => bail!("cost needs START_DATE and END_DATE, or --mission"),
        },
        Command::AssignPilot {
            pilot_id,
            mission_id,
        } => print_mutation(&state.assign_pilot(&pilot_id, &mission_id, CLI_ACTOR)?),
        Command::AssignDrone {
            drone_id,
            mission_id,
        } => print_mutation(&state.assign_drone(&drone_id, &mission_id, CLI_ACTOR)?),
        Command::SetPilotStatus { pilot_id, status } => {
            print_mutation(&state.set_pilot_status(&pilot_id, &status, CLI_ACTOR)?)
        }
        Command::SetDroneStatus { drone_id, status } => {
            print_mutation(&state.set_drone_status(&drone_id, &status, CLI_ACTOR)?)
        }
        Command::Push => {
            for notice in state.push_to_sheet() {
                print_notice(&notice);
            }
        }
        Command::Pull => {
            state.pull_from_sheet()?;
            println!("{}", state.coordinator.dashboard_summary().render());
        }
        Command::Chat { message } => run_chat(&mut state, message).await?,
    }

    Ok(())
}

async fn run_chat(state: &mut AppState, message: Option<String>) -> Result<()> {
    if let Some(message) = message {
        return chat_once(state, &message).await;
    }

    println!("SkyOps assistant. Type 'exit' to quit, 'reset' to restore the loaded roster.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => continue,
            "exit" | "quit" => break,
            "reset" => {
                state.reset();
                println!("Roster restored.");
            }
            text => chat_once(state, text).await?,
        }
    }
    Ok(())
}

async fn chat_once(state: &mut AppState, message: &str) -> Result<()> {
    let report = state.chat(message).await?;
    println!("{}", report.reply.text);
    if let Some(notice) = report.sync {
        print_notice(&notice);
    }
    Ok(())
}

fn print_mutation(report: &MutationReport) {
    println!("{}", report.render());
}

fn print_notice(notice: &SyncNotice) {
    if let Some(message) = notice.message() {
        if notice.is_warning() {
            eprintln!("{}", message);
        } else {
            println!("{}", message);
        }
    }
}

fn issues_text(issues: &[String]) -> String {
    if issues.is_empty() {
        "no issues".to_string()
    } else {
        issues.join("; ")
    }
}

fn parse_date_arg(raw: &str) -> Result<NaiveDate> {
    parse_flexible_date(raw).with_context(|| format!("cannot parse date '{}'", raw))
}
