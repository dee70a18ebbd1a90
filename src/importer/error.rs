// ==========================================
// 无人机作业协调系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file format: {0} (expected .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("Failed to read file: {0}")]
    FileReadError(String),

    #[error("Excel parse error: {0}")]
    ExcelParseError(String),

    #[error("CSV parse error: {0}")]
    CsvParseError(String),

    #[error("Worksheet not found: {0}")]
    SheetNotFound(String),

    // ===== 字段映射错误 =====
    #[error("Missing column '{column}' in {table}")]
    MissingColumn { table: String, column: String },

    #[error("Type conversion failed ({table} row {row}, field {field}): {message}")]
    TypeConversionError {
        table: String,
        row: usize,
        field: String,
        message: String,
    },

    #[error("Invalid date ({table} row {row}, field {field}): '{value}'")]
    DateFormatError {
        table: String,
        row: usize,
        field: String,
        value: String,
    },

    #[error("Invalid value ({table} row {row}, field {field}): '{value}'")]
    InvalidEnumValue {
        table: String,
        row: usize,
        field: String,
        value: String,
    },

    #[error("Missing primary key ({table} row {row})")]
    PrimaryKeyMissing { table: String, row: usize },

    #[error("Duplicate id '{id}' in {table}")]
    DuplicateId { table: String, id: String },

    #[error("Invalid date range in {table} row {row}: end date before start date")]
    InvalidDateRange { table: String, row: usize },
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

impl From<calamine::XlsxError> for ImportError {
    fn from(err: calamine::XlsxError) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
