use super::*;
use crate::domain::models::category::CategoryKind;

const HEADER: &str = "title,company,city,job_type,deadline,apply_url,education,categories,tags";

fn catalog() -> (Vec<Category>, Vec<Tag>) {
    (
        vec![
            Category::new("国企".to_string(), CategoryKind::Nature, 0),
            Category::new("外企".to_string(), CategoryKind::Nature, 1),
            Category::new("互联网".to_string(), CategoryKind::Other, 0),
            Category::new("金融".to_string(), CategoryKind::Other, 1),
            Category::new("制造".to_string(), CategoryKind::Other, 2),
        ],
        vec![Tag::new("双休".to_string())],
    )
}

#[test]
fn test_parse_quoted_fields() {
    let records =
        parse_csv("a,\"b,c\",\"say \"\"hi\"\"\"\r\n\"multi\nline\",x,y\n").unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].fields, vec!["a", "b,c", "say \"hi\""]);
    assert_eq!(records[0].line, 1);
    assert_eq!(records[1].fields, vec!["multi\nline", "x", "y"]);
    assert_eq!(records[1].line, 2);
}

#[test]
fn test_parse_skips_blank_lines_and_bom() {
    let records = parse_csv("\u{feff}h1,h2\n\n1,2\n   \n3,4").unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].fields, vec!["h1", "h2"]);
    assert_eq!(records[2].fields, vec!["3", "4"]);
    assert_eq!(records[2].line, 5);
}

#[test]
fn test_parse_keeps_empty_trailing_field() {
    let records = parse_csv("a,b,\n").unwrap();
    assert_eq!(records[0].fields, vec!["a", "b", ""]);
}

#[test]
fn test_parse_rejects_unterminated_quote() {
    let err = parse_csv("a,b\n1,\"open\n2,3").unwrap_err();
    assert_eq!(err, CsvParseError::UnterminatedQuote { line: 2 });
}

#[test]
fn test_parse_rejects_stray_quote() {
    assert_eq!(
        parse_csv("ab\"c,d").unwrap_err(),
        CsvParseError::UnexpectedQuote { line: 1 }
    );
    assert_eq!(
        parse_csv("\"ab\"c,d").unwrap_err(),
        CsvParseError::UnexpectedQuote { line: 1 }
    );
}

#[test]
fn test_header_missing_required_column_rejects_file() {
    let (categories, tags) = catalog();
    let validator = JobRowValidator::new(&categories, &tags);

    let err = validator
        .validate_csv("title,company,city,job_type,apply_url\nA,B,C,全职,https://x.example")
        .unwrap_err();
    assert_eq!(err, CsvParseError::MissingColumns(vec!["deadline".to_string()]));
}

#[test]
fn test_header_is_case_insensitive() {
    let (categories, tags) = catalog();
    let validator = JobRowValidator::new(&categories, &tags);

    let result = validator
        .validate_csv(
            " Title ,COMPANY,City,Job_Type,Deadline,Apply_URL\n后端开发,Acme,上海,全职,2026-12-31,https://acme.example/apply\n",
        )
        .unwrap();
    assert_eq!(result.rows.len(), 1);
    assert!(result.errors.is_empty());
}

#[test]
fn test_valid_row_becomes_draft() {
    let (categories, tags) = catalog();
    let validator = JobRowValidator::new(&categories, &tags);
    let csv = format!(
        "{}\n\"Rust 工程师, 存储\",Acme,北京,实习,2026/11/30,https://acme.example/a,本科,国企;互联网,双休\n",
        HEADER
    );

    let result = validator.validate_csv(&csv).unwrap();
    assert_eq!(result.total_rows, 1);
    let draft = &result.rows[0].draft;
    assert_eq!(draft.title, "Rust 工程师, 存储");
    assert_eq!(draft.job_type, JobType::Internship);
    assert_eq!(draft.education, Education::Bachelor);
    assert_eq!(draft.deadline, NaiveDate::from_ymd_opt(2026, 11, 30));
    assert_eq!(draft.category_ids, vec![categories[0].id, categories[2].id]);
    assert_eq!(draft.tag_ids, vec![tags[0].id]);
}

#[test]
fn test_row_errors_are_reported_with_line_numbers() {
    let (categories, tags) = catalog();
    let validator = JobRowValidator::new(&categories, &tags);
    let csv = [
        HEADER,
        "A,Acme,北京,全职,2026-12-31,https://a.example,,,",
        ",Acme,北京,全职,2026-12-31,https://a.example,,,",
        "B,Acme,北京,合同工,2026-12-31,https://a.example,,,",
        "C,Acme,北京,全职,2026-13-40,https://a.example,,,",
        "D,Acme,北京,全职,2026-12-31,ftp://a.example,,,",
        "E,Acme,北京,全职,2026-12-31,https://a.example,,国企;外企,",
        "F,Acme,北京,全职,2026-12-31,https://a.example,,互联网;金融;制造,",
        "G,Acme,北京,全职,2026-12-31,https://a.example,,不存在,",
        "H,Acme,北京",
    ]
    .join("\n");

    let result = validator.validate_csv(&csv).unwrap();
    assert_eq!(result.total_rows, 9);
    assert_eq!(result.rows.len(), 1);
    assert_eq!(result.rows[0].line, 2);

    let lines: Vec<usize> = result.errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![3, 4, 5, 6, 7, 8, 9, 10]);
    assert!(result.errors[0].message.contains("title"));
    assert!(result.errors[1].message.contains("job_type"));
    assert!(result.errors[2].message.contains("invalid date"));
    assert!(result.errors[3].message.contains("apply_url"));
    assert!(result.errors[4].message.contains("enterprise-nature"));
    assert!(result.errors[5].message.contains("other categories"));
    assert!(result.errors[6].message.contains("unknown category"));
    assert!(result.errors[7].message.contains("columns"));
}

#[test]
fn test_empty_file() {
    let validator = JobRowValidator::new(&[], &[]);
    assert_eq!(validator.validate_csv("\n\n").unwrap_err(), CsvParseError::Empty);
}
