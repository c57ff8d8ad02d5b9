//! End-to-end tests over a synthetic quarter folder.

use std::path::{Path, PathBuf};

use calamine::{Data, Reader, open_workbook_auto};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use qrs_cli::cli::{QuarterArg, QuarterArgs};
use qrs_cli::commands::{run_quarter, run_sources};

const RULES_JSON: &str = r#"{
    "classification_mapping": [
        {"药品类别一": "生物制品", "药品类别二": "抗体",
         "类别(粗分)": "BIO", "详细列（细分）": "Antibody"},
        {"药品类别一": "化学药品", "药品类别二": "其他",
         "类别(粗分)": "SMD", "详细列（细分）": "SMD"}
    ],
    "disease_area_mapping": {
        "Oncology": "肿瘤",
        "Hematology": "血液",
        "Other": "其他"
    }
}"#;

const TEMPLATE_JSON: &str = r#"{
    "NMPA approved drugs": ["序号", "通用名", "剂型", "类型", "靶点"],
    "FDA approved drugs": ["序号", "活性成分(中文)", "类型"],
    "China IND": ["序号", "通用名", "类型", "备案号"],
    "China NDA": ["序号", "通用名", "类型"]
}"#;

fn write_sheet(path: &Path, sheet: &str, rows: &[&[&str]]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).unwrap();
    for (row_idx, row) in rows.iter().enumerate() {
        for (col_idx, cell) in row.iter().enumerate() {
            if !cell.is_empty() {
                worksheet
                    .write_string(row_idx as u32, col_idx as u16, *cell)
                    .unwrap();
            }
        }
    }
    workbook.save(path).unwrap();
}

fn build_quarter_folder(dir: &Path) {
    write_sheet(
        &dir.join("2024_Q4_IND申报.xlsx"),
        "数据详情",
        &[
            &["受理号", "通用名", "剂型", "持证商", "CDE承办日期", "药品类别一", "药品类别二", "靶点", "参考疾病领域"],
            &["CX001", "药品甲", "片剂", "公司A", "2024-01-10", "生物制品", "抗体", "EGFR", "肿瘤"],
            &["CX002", "药品甲", "片剂", "公司A", "2024-03-20", "生物制品", "抗体", "EGFR", "肿瘤"],
            &["CX003", "药品乙", "胶囊", "公司B", "2024-02-11", "化学药品", "其他", "", "血液"],
        ],
    );
    write_sheet(
        &dir.join("2024_Q4_NDA上市.xlsx"),
        "数据详情",
        &[
            &["通用名", "剂型", "持证商", "CDE承办日期", "药品类别一", "药品类别二", "靶点", "参考疾病领域"],
            &["药品丙", "注射剂", "公司C", "2024-02-01", "中药", "中成药", "", "其他"],
        ],
    );
    write_sheet(
        &dir.join("FDA获批.xlsx"),
        "目标药品",
        &[
            &["活性成分(中文)", "申请机构", "剂型", "药品类别一", "药品类别二", "靶点"],
            &["成分一", "机构A", "注射剂", "生物制品", "抗体", "PD-1"],
            &["成分一", "机构A", "注射剂", "生物制品", "抗体", "PD-1"],
            &["成分二", "机构B", "片剂", "化学药品", "其他", "KRAS"],
        ],
    );
    write_sheet(
        &dir.join("NMPA获批.xlsx"),
        "数据详情",
        &[
            &["最新批准日期", "通用名", "剂型", "持证商(NMPA)", "药品类别一", "药品类别二", "靶点", "参考疾病领域"],
            &["2024-11-20", "药品丁", "片剂", "公司D", "生物制品", "抗体", "HER2", "肿瘤"],
            &["2024-10-05", "药品丁", "片剂", "公司D", "生物制品", "抗体", "HER2", "肿瘤"],
            &["2024-09-30", "药品戊", "片剂", "公司E", "生物制品", "抗体", "VEGF", "肿瘤"],
        ],
    );
}

struct Fixture {
    _dir: TempDir,
    args: QuarterArgs,
}

fn fixture() -> Fixture {
    let dir = TempDir::new().unwrap();
    let quarter_folder = dir.path().join("2024_Q4");
    std::fs::create_dir(&quarter_folder).unwrap();
    build_quarter_folder(&quarter_folder);

    let rules_config = dir.path().join("rules_config.json");
    std::fs::write(&rules_config, RULES_JSON).unwrap();
    let template_config = dir.path().join("template_columns.json");
    std::fs::write(&template_config, TEMPLATE_JSON).unwrap();

    let args = QuarterArgs {
        quarter_folder,
        year: 2024,
        quarter: QuarterArg::Q4,
        output_dir: Some(dir.path().join("out")),
        rules_config,
        template_config,
        no_final_export: false,
    };
    Fixture { _dir: dir, args }
}

fn cell(range: &calamine::Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        Some(Data::Empty) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn sheet_values(path: &Path, sheet: &str) -> Vec<Vec<String>> {
    let mut workbook = open_workbook_auto(path).unwrap();
    let range = workbook.worksheet_range(sheet).unwrap();
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|value| match value {
                    Data::Empty => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect()
}

#[test]
fn full_quarter_run_produces_all_outputs() {
    let fixture = fixture();
    let result = run_quarter(&fixture.args).unwrap();

    assert!(!result.has_errors, "errors: {:?}", result.errors);
    assert_eq!(result.sources.len(), 4);
    for summary in &result.sources {
        assert!(summary.records.is_some(), "{} skipped", summary.source);
        assert!(summary.stat_blocks > 0, "{} has no stats", summary.source);
    }

    // Intermediate workbooks exist with the summary sheet.
    let intermediate_dir = result.output_dir.join("Q4_intermediate");
    for code in ["IND", "NDA", "FDA", "NMPA"] {
        let path = intermediate_dir.join(format!("Q4_{code}_结果.xlsx"));
        assert!(path.exists(), "missing {}", path.display());
        let mut workbook = open_workbook_auto(&path).unwrap();
        assert!(
            workbook
                .sheet_names()
                .iter()
                .any(|name| name == "所有统计汇总"),
            "{code} intermediate lacks the summary sheet"
        );
    }

    // Final workbook holds the four sheets in export order.
    let final_path = result.final_workbook.clone().expect("final workbook");
    let mut workbook = open_workbook_auto(&final_path).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec![
            "NMPA approved drugs".to_string(),
            "FDA approved drugs".to_string(),
            "China IND".to_string(),
            "China NDA".to_string(),
        ]
    );

    // NMPA: quarter filter kept the two Q4 rows, dedup kept the earliest.
    let nmpa = workbook.worksheet_range("NMPA approved drugs").unwrap();
    assert_eq!(cell(&nmpa, 0, 0), "序号");
    assert_eq!(cell(&nmpa, 1, 1), "药品丁");
    assert_eq!(cell(&nmpa, 1, 3), "BIO"); // 类型 from 类别(粗分)
    assert_eq!(cell(&nmpa, 2, 0), ""); // exactly one data row

    // IND: dedup kept the later filing; rows sorted ascending by date.
    let ind = workbook.worksheet_range("China IND").unwrap();
    assert_eq!(cell(&ind, 0, 3), "备案号");
    assert_eq!(cell(&ind, 1, 1), "药品乙");
    assert_eq!(cell(&ind, 1, 2), "SMD");
    assert_eq!(cell(&ind, 2, 1), "药品甲");
    assert_eq!(cell(&ind, 2, 2), "BIO");
    assert_eq!(cell(&ind, 1, 3), ""); // template-only column is null

    // Stats blocks start three rows below the IND data block.
    assert_eq!(cell(&ind, 5, 0), "【粗分类统计】");

    // FDA: dedup kept two of three rows; no disease-area block exported.
    let fda = workbook.worksheet_range("FDA approved drugs").unwrap();
    assert_eq!(cell(&fda, 1, 1), "成分一");
    assert_eq!(cell(&fda, 2, 1), "成分二");
    let fda_text: Vec<String> = fda
        .rows()
        .map(|row| {
            row.iter()
                .map(|value| value.to_string())
                .collect::<Vec<_>>()
                .join("|")
        })
        .collect();
    assert!(fda_text.iter().any(|line| line.contains("【粗分类统计】")));
    assert!(fda_text.iter().any(|line| line.contains("【靶点统计】")));
    assert!(!fda_text.iter().any(|line| line.contains("【疾病领域统计】")));
}

#[test]
fn rerun_is_idempotent() {
    let fixture = fixture();
    let first = run_quarter(&fixture.args).unwrap();
    let first_path = first.final_workbook.expect("final workbook");
    let first_ind = sheet_values(&first_path, "China IND");

    let second = run_quarter(&fixture.args).unwrap();
    let second_path = second.final_workbook.expect("final workbook");
    let second_ind = sheet_values(&second_path, "China IND");

    assert_eq!(first_ind, second_ind);
}

#[test]
fn missing_source_is_skipped_not_fatal() {
    let fixture = fixture();
    std::fs::remove_file(fixture.args.quarter_folder.join("FDA获批.xlsx")).unwrap();

    let result = run_quarter(&fixture.args).unwrap();
    assert!(!result.has_errors, "errors: {:?}", result.errors);

    let fda_summary = result
        .sources
        .iter()
        .find(|summary| summary.source.code() == "FDA")
        .unwrap();
    assert!(fda_summary.input_file.is_none());
    assert!(fda_summary.records.is_none());

    // The final workbook simply lacks the FDA sheet.
    let final_path = result.final_workbook.expect("final workbook");
    let mut workbook = open_workbook_auto(&final_path).unwrap();
    assert!(
        !workbook
            .sheet_names()
            .iter()
            .any(|name| name == "FDA approved drugs")
    );
}

#[test]
fn failing_source_degrades_to_an_error_entry() {
    let fixture = fixture();
    // Rewrite the NMPA file without its required license-holder column.
    write_sheet(
        &fixture.args.quarter_folder.join("NMPA获批.xlsx"),
        "数据详情",
        &[
            &["最新批准日期", "通用名", "剂型"],
            &["2024-10-05", "药品丁", "片剂"],
        ],
    );

    let result = run_quarter(&fixture.args).unwrap();
    assert!(result.has_errors);
    assert!(
        result
            .errors
            .iter()
            .any(|error| error.contains("NMPA") && error.contains("持证商(NMPA)")),
        "errors: {:?}",
        result.errors
    );

    // The other three sources still export.
    let final_path = result.final_workbook.expect("final workbook");
    let mut workbook = open_workbook_auto(&final_path).unwrap();
    assert_eq!(workbook.sheet_names().len(), 3);
}

#[test]
fn sources_listing_succeeds() {
    run_sources().unwrap();
}

#[test]
fn missing_rules_config_is_fatal() {
    let mut fixture = fixture();
    fixture.args.rules_config = PathBuf::from("/nonexistent/rules.json");
    let error = run_quarter(&fixture.args).unwrap_err();
    assert!(format!("{error:#}").contains("rules"));
}
