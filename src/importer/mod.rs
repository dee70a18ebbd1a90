// ==========================================
// 无人机作业协调系统 - 名册导入模块
// ==========================================
// 流程: 文件解析 → 字段映射 → 唯一性校验 → 任务编号规范化
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod roster_importer;

pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawTable, UniversalFileParser};
pub use roster_importer::RosterImporter;
