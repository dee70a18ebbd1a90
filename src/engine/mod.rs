// ==========================================
// 无人机作业协调系统 - 引擎层
// ==========================================
// 职责: 过滤、计费、评分匹配、冲突检测、改派规划、写入校验
// 红线: 引擎不做 I/O;所有扣分与违规都必须输出原因文本
// ==========================================

pub mod conflict;
pub mod cost;
pub mod error;
pub mod lookup;
pub mod maintenance;
pub mod matcher;
pub mod mutator;
pub mod query;
pub mod reassignment;
pub mod reports;

// 重导出核心引擎
pub use conflict::{ConflictDetector, ConflictFinding, ConflictKind, ConflictReport};
pub use cost::{BudgetCheck, CostCalculator, CostQuote};
pub use error::{EngineError, EngineResult};
pub use maintenance::{MaintenanceAlert, MaintenanceMonitor};
pub use matcher::{DroneCandidate, MatchEngine, PilotCandidate};
pub use mutator::{MutationOutcome, RosterMutator};
pub use query::{DroneQuery, PilotQuery};
pub use reassignment::{ReassignmentPlan, ReassignmentPlanner};
pub use reports::{AssignmentRow, DashboardSummary, RosterReports};
