// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::activation_code::ActivationCode;
use crate::domain::models::statistics::Statistics;

/// 导出文件的 UTF-8 BOM，保证 Excel 正确识别中文
pub const UTF8_BOM: &str = "\u{feff}";

/// 激活码导出的表头
pub const CODE_COLUMNS: [&str; 8] = [
    "code",
    "tier",
    "validity_days",
    "status",
    "used_by",
    "used_at",
    "note",
    "created_at",
];

/// 转义单个字段：包含逗号、引号或换行时用双引号包裹，内部引号加倍
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn write_row<I, S>(out: &mut String, fields: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let line = fields
        .into_iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push_str("\r\n");
}

/// 导出激活码列表
pub fn codes_to_csv(codes: &[ActivationCode]) -> String {
    let mut out = String::from(UTF8_BOM);
    write_row(&mut out, CODE_COLUMNS);
    for code in codes {
        write_row(
            &mut out,
            [
                code.code.clone(),
                code.tier.to_string(),
                code.validity_days.to_string(),
                code.status_label().to_string(),
                code.used_by.map(|id| id.to_string()).unwrap_or_default(),
                code.used_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
                code.note.clone().unwrap_or_default(),
                code.created_at.to_rfc3339(),
            ],
        );
    }
    out
}

/// 导出统计概览，每行一个指标
pub fn statistics_to_csv(stats: &Statistics) -> String {
    let mut out = String::from(UTF8_BOM);
    write_row(&mut out, ["metric", "value"]);
    for (metric, value) in stats.metric_rows() {
        write_row(&mut out, [metric, value]);
    }
    out
}
