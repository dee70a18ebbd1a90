// ==========================================
// 无人机作业协调系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx, 每张表一个工作表) / CSV (.csv, 每张表一个文件)
// 输出: 表头 + 行记录（HashMap<列名, 值>）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

pub type RawRecord = HashMap<String, String>;

/// 解析后的原始表
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub records: Vec<RawRecord>,
}

impl RawTable {
    /// 由表头 + 行数据构建（表格存储读出的数据走这里）
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let records = rows
            .into_iter()
            .map(|row| {
                headers
                    .iter()
                    .cloned()
                    .zip(row.into_iter().map(|v| v.trim().to_string()))
                    .collect::<RawRecord>()
            })
            // 跳过完全空白的行
            .filter(|record| !record.values().all(|v| v.is_empty()))
            .collect();
        Self { headers, records }
    }
}

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser: Send + Sync {
    /// 解析一张表
    ///
    /// # 参数
    /// - file_path: 文件路径
    /// - table: 表名（Excel 中为工作表名;CSV 忽略）
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 行记录
    /// - Err: 文件读取错误、格式错误
    fn parse_table(&self, file_path: &Path, table: &str) -> ImportResult<RawTable>;
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_table(&self, file_path: &Path, _table: &str) -> ImportResult<RawTable> {
        let path = file_path;

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        if let Some(ext) = path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|v| v.to_string()).collect());
        }

        Ok(RawTable::from_rows(headers, rows))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_table(&self, file_path: &Path, table: &str) -> ImportResult<RawTable> {
        let path = file_path;

        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "xlsx" && ext != "xls" {
            return Err(ImportError::UnsupportedFormat(ext.to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(path)?;

        if !workbook.sheet_names().iter().any(|name| name == table) {
            return Err(ImportError::SheetNotFound(table.to_string()));
        }

        let range = workbook
            .worksheet_range(table)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        // 第一行为表头
        let mut rows = range.rows();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row.iter().map(|cell| cell.to_string()).collect(),
            None => return Ok(RawTable::default()),
        };

        let data: Vec<Vec<String>> = rows
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();

        Ok(RawTable::from_rows(headers, data))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(&self, file_path: P, table: &str) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_table(path, table),
            "xlsx" | "xls" => ExcelParser.parse_table(path, table),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
