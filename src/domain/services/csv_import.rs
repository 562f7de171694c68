// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::models::category::Category;
use crate::domain::models::job::{Education, JobDraft, JobType};
use crate::domain::models::tag::Tag;
use crate::domain::services::category_rules::{
    validate_category_selection, validate_tag_selection,
};

/// 导入文件必须包含的列
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "title",
    "company",
    "city",
    "job_type",
    "deadline",
    "apply_url",
];

/// 导入文件可选的列
pub const OPTIONAL_COLUMNS: [&str; 5] = ["education", "salary", "description", "categories", "tags"];

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("valid url regex"));

/// CSV 解析错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CsvParseError {
    #[error("line {line}: unterminated quoted field")]
    UnterminatedQuote { line: usize },

    #[error("line {line}: unexpected quote inside an unquoted field")]
    UnexpectedQuote { line: usize },

    #[error("the file contains no header row")]
    Empty,

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("duplicate column: {0}")]
    DuplicateColumn(String),
}

/// 解析后的一条记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRecord {
    /// 记录起始行号（从 1 开始）
    pub line: usize,
    pub fields: Vec<String>,
}

/// 解析 CSV 文本
///
/// 支持双引号包裹字段、`""` 转义、引号内的逗号与换行、CRLF/LF 换行；
/// 去除 UTF-8 BOM，跳过空行。
pub fn parse_csv(input: &str) -> Result<Vec<CsvRecord>, CsvParseError> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);
    let mut parser = RecordBuilder::default();
    let mut chars = input.chars().peekable();
    let mut line = 1;
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    parser.field.push('"');
                }
                '"' => in_quotes = false,
                '\r' if chars.peek() == Some(&'\n') => {}
                '\n' => {
                    line += 1;
                    parser.field.push('\n');
                }
                _ => parser.field.push(c),
            }
            continue;
        }

        match c {
            '"' if parser.field.is_empty() && !parser.quoted => {
                in_quotes = true;
                parser.quoted = true;
            }
            '"' => return Err(CsvParseError::UnexpectedQuote { line }),
            ',' => parser.end_field(),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\r' | '\n' => {
                parser.end_record();
                line += 1;
                parser.start_line = line;
            }
            // 闭合引号之后只允许空白
            _ if parser.quoted => {
                if !c.is_whitespace() {
                    return Err(CsvParseError::UnexpectedQuote { line });
                }
            }
            _ => parser.field.push(c),
        }
    }

    if in_quotes {
        return Err(CsvParseError::UnterminatedQuote {
            line: parser.start_line,
        });
    }
    parser.end_record();
    Ok(parser.records)
}

#[derive(Debug)]
struct RecordBuilder {
    records: Vec<CsvRecord>,
    fields: Vec<String>,
    field: String,
    quoted: bool,
    start_line: usize,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            fields: Vec::new(),
            field: String::new(),
            quoted: false,
            start_line: 1,
        }
    }
}

impl RecordBuilder {
    fn end_field(&mut self) {
        self.fields.push(std::mem::take(&mut self.field));
        self.quoted = false;
    }

    fn end_record(&mut self) {
        let blank = self.fields.is_empty() && self.field.trim().is_empty() && !self.quoted;
        if blank {
            self.field.clear();
            return;
        }
        self.end_field();
        self.records.push(CsvRecord {
            line: self.start_line,
            fields: std::mem::take(&mut self.fields),
        });
    }
}

/// 表头：列名到下标的映射
#[derive(Debug, Clone)]
pub struct ImportHeader {
    columns: HashMap<String, usize>,
    width: usize,
}

impl ImportHeader {
    /// 解析表头，缺少必填列时整体拒绝
    pub fn from_record(record: &CsvRecord) -> Result<Self, CsvParseError> {
        let mut columns = HashMap::new();
        for (index, name) in record.fields.iter().enumerate() {
            let name = name.trim().to_lowercase();
            if name.is_empty() {
                continue;
            }
            if columns.insert(name.clone(), index).is_some() {
                return Err(CsvParseError::DuplicateColumn(name));
            }
        }

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !columns.contains_key(**c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(CsvParseError::MissingColumns(missing));
        }

        Ok(Self {
            columns,
            width: record.fields.len(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// 读取某列的值（已去除首尾空白），列不存在时返回空串
    pub fn cell<'a>(&self, record: &'a CsvRecord, column: &str) -> &'a str {
        self.columns
            .get(column)
            .and_then(|i| record.fields.get(*i))
            .map(|s| s.trim())
            .unwrap_or("")
    }
}

/// 单行导入错误
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// 导入结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub total_rows: usize,
    pub imported: usize,
    pub dry_run: bool,
    pub errors: Vec<RowError>,
}

/// 校验通过的行
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRow {
    pub line: usize,
    pub draft: JobDraft,
}

/// 整个文件的校验结果
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedImport {
    pub total_rows: usize,
    pub rows: Vec<ValidatedRow>,
    pub errors: Vec<RowError>,
}

/// 岗位导入行校验器
pub struct JobRowValidator<'a> {
    categories: &'a [Category],
    tags: &'a [Tag],
}

impl<'a> JobRowValidator<'a> {
    pub fn new(categories: &'a [Category], tags: &'a [Tag]) -> Self {
        Self { categories, tags }
    }

    /// 解析并校验整个 CSV 文件
    pub fn validate_csv(&self, input: &str) -> Result<ValidatedImport, CsvParseError> {
        let records = parse_csv(input)?;
        let (header_record, rows) = records.split_first().ok_or(CsvParseError::Empty)?;
        let header = ImportHeader::from_record(header_record)?;

        let mut validated = ValidatedImport {
            total_rows: rows.len(),
            rows: Vec::new(),
            errors: Vec::new(),
        };
        for record in rows {
            match self.validate_row(&header, record) {
                Ok(draft) => validated.rows.push(ValidatedRow {
                    line: record.line,
                    draft,
                }),
                Err(message) => validated.errors.push(RowError {
                    line: record.line,
                    message,
                }),
            }
        }
        Ok(validated)
    }

    /// 校验单行并转换为岗位草稿
    pub fn validate_row(&self, header: &ImportHeader, record: &CsvRecord) -> Result<JobDraft, String> {
        if record.fields.len() != header.width() {
            return Err(format!(
                "expected {} columns, found {}",
                header.width(),
                record.fields.len()
            ));
        }

        for column in REQUIRED_COLUMNS {
            if header.cell(record, column).is_empty() {
                return Err(format!("missing required column '{}'", column));
            }
        }

        let job_type: JobType = header.cell(record, "job_type").parse()?;
        let education = match header.cell(record, "education") {
            "" => Education::Any,
            value => value.parse()?,
        };
        let deadline = parse_date(header.cell(record, "deadline"))?;

        let apply_url = header.cell(record, "apply_url");
        if !URL_RE.is_match(apply_url) {
            return Err(format!("invalid apply_url: {}", apply_url));
        }

        let category_ids = self.resolve_categories(header.cell(record, "categories"))?;
        validate_category_selection(&category_ids, self.categories).map_err(|e| e.to_string())?;
        let tag_ids = self.resolve_tags(header.cell(record, "tags"))?;
        validate_tag_selection(&tag_ids, self.tags).map_err(|e| e.to_string())?;

        Ok(JobDraft {
            title: header.cell(record, "title").to_string(),
            company: header.cell(record, "company").to_string(),
            city: header.cell(record, "city").to_string(),
            job_type,
            education,
            salary: non_empty(header.cell(record, "salary")),
            description: non_empty(header.cell(record, "description")),
            apply_url: apply_url.to_string(),
            deadline: Some(deadline),
            category_ids,
            tag_ids,
        })
    }

    fn resolve_categories(&self, cell: &str) -> Result<Vec<Uuid>, String> {
        split_names(cell)
            .map(|name| {
                self.categories
                    .iter()
                    .find(|c| c.name == name)
                    .map(|c| c.id)
                    .ok_or_else(|| format!("unknown category: {}", name))
            })
            .collect()
    }

    fn resolve_tags(&self, cell: &str) -> Result<Vec<Uuid>, String> {
        split_names(cell)
            .map(|name| {
                self.tags
                    .iter()
                    .find(|t| t.name == name)
                    .map(|t| t.id)
                    .ok_or_else(|| format!("unknown tag: {}", name))
            })
            .collect()
    }
}

/// 解析日期，支持 `YYYY-MM-DD` 与 `YYYY/MM/DD`
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y/%m/%d"))
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", value))
}

fn split_names(cell: &str) -> impl Iterator<Item = &str> {
    cell.split([';', '；'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
#[path = "csv_import_test.rs"]
mod tests;
