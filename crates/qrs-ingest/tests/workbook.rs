//! Round-trip tests: write a workbook with `rust_xlsxwriter`, read it back.

use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use qrs_ingest::{IngestError, read_sheet_table};
use qrs_model::Value;

fn write_fixture(dir: &TempDir, name: &str, sheet: &str, rows: &[&[&str]]) -> std::path::PathBuf {
    let path = dir.path().join(name);
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
    workbook.save(&path).unwrap();
    path
}

#[test]
fn reads_headers_and_rows() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "ind.xlsx",
        "数据详情",
        &[
            &["通用名", "剂型", "靶点"],
            &["药品甲", "片剂", "EGFR"],
            &["药品乙", "胶囊", ""],
        ],
    );

    let table = read_sheet_table(&path, "数据详情").unwrap();
    assert_eq!(table.columns, vec!["通用名", "剂型", "靶点"]);
    assert_eq!(table.height(), 2);
    assert_eq!(table.value(0, "靶点"), Some(&Value::text("EGFR")));
    assert_eq!(table.value(1, "靶点"), Some(&Value::Missing));
}

#[test]
fn numbers_come_back_typed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("n.xlsx");
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("数据详情").unwrap();
    worksheet.write_string(0, 0, "序号").unwrap();
    worksheet.write_number(1, 0, 7.0).unwrap();
    workbook.save(&path).unwrap();

    let table = read_sheet_table(&path, "数据详情").unwrap();
    assert_eq!(table.value(0, "序号"), Some(&Value::Number(7.0)));
}

#[test]
fn all_empty_rows_are_dropped() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "gap.xlsx",
        "目标药品",
        &[
            &["活性成分(中文)"],
            &["成分一"],
            &[""],
            &["成分二"],
        ],
    );
    let table = read_sheet_table(&path, "目标药品").unwrap();
    assert_eq!(table.height(), 2);
}

#[test]
fn missing_sheet_lists_available_names() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "x.xlsx", "其他", &[&["a"]]);
    let err = read_sheet_table(&path, "数据详情").unwrap_err();
    match err {
        IngestError::SheetNotFound {
            sheet, available, ..
        } => {
            assert_eq!(sheet, "数据详情");
            assert_eq!(available, vec!["其他".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}
