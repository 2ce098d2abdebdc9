use scireport::errors::AppError;
use scireport::models::schema::{OTHER, TableKind};
use scireport::models::table::{RowSnapshot, TableModel, naas_rating};

fn table_with_rows(kind: TableKind, n: usize) -> TableModel {
    let mut t = TableModel::new(kind);
    for _ in 0..n {
        t.append();
    }
    t
}

#[test]
fn append_hands_out_sequential_indices() {
    let t = table_with_rows(TableKind::Ipr, 3);
    let idx: Vec<usize> = t.rows().iter().map(|r| r.index).collect();
    assert_eq!(idx, vec![1, 2, 3]);
    assert_eq!(t.counter(), 3);
}

#[test]
fn delete_renumbers_in_original_order() {
    let mut t = table_with_rows(TableKind::Ipr, 4);
    for i in 1..=4 {
        t.set_field(i, 3, &format!("REG-{i}")).unwrap();
    }

    t.delete(2).unwrap();

    let idx: Vec<usize> = t.rows().iter().map(|r| r.index).collect();
    let regs: Vec<&str> = t.rows().iter().map(|r| r.value(3)).collect();
    assert_eq!(idx, vec![1, 2, 3]);
    assert_eq!(regs, vec!["REG-1", "REG-3", "REG-4"]);

    // the next row continues after the last live index
    assert_eq!(t.append(), 4);
}

#[test]
fn delete_unknown_row_fails() {
    let mut t = table_with_rows(TableKind::Ipr, 2);
    assert!(matches!(t.delete(3), Err(AppError::InvalidRow(3))));
    assert!(matches!(t.delete(0), Err(AppError::InvalidRow(0))));
    assert_eq!(t.len(), 2);
}

#[test]
fn other_reveals_and_hides_detail_in_every_table() {
    for kind in TableKind::ALL {
        for (i, column) in kind.schema().iter().enumerate() {
            if !column.allows_other() {
                continue;
            }
            let col = i + 1;
            let mut t = table_with_rows(kind, 1);

            t.set_field(1, col, OTHER).unwrap();
            assert!(t.row(1).unwrap().cell(col).unwrap().is_revealed());
            assert_eq!(t.missing_details(), vec![(1, column.label)]);

            t.set_detail(1, col, "Something else").unwrap();
            assert_eq!(t.row(1).unwrap().value(col), "Something else");
            assert!(t.missing_details().is_empty());

            let regular = column.options().unwrap()[0];
            t.set_field(1, col, regular).unwrap();
            let cell = t.row(1).unwrap().cell(col).unwrap();
            assert!(!cell.is_revealed());
            assert_eq!(cell.persisted(), regular);
        }
    }
}

#[test]
fn choice_outside_options_is_rejected() {
    let mut t = table_with_rows(TableKind::Ipr, 1);
    let err = t.set_field(1, 1, "Trade secret").unwrap_err();
    assert!(matches!(err, AppError::InvalidChoice { .. }));
    assert_eq!(t.row(1).unwrap().value(1), "");
}

#[test]
fn detail_requires_other() {
    let mut t = table_with_rows(TableKind::Programs, 1);
    t.set_field(1, 1, "Conference").unwrap();
    assert!(matches!(
        t.set_detail(1, 1, "Workshop"),
        Err(AppError::Validation(_))
    ));
}

#[test]
fn na_title_disables_the_rest_of_the_project() {
    let mut t = table_with_rows(TableKind::Projects, 1);
    t.set_field(1, 1, "NA").unwrap();

    let row = t.row(1).unwrap();
    assert!(!row.cell(1).unwrap().disabled);
    assert!(row.cells.iter().skip(1).all(|c| c.disabled));
    assert!(matches!(
        t.set_field(1, 2, "DST"),
        Err(AppError::FieldLocked(_))
    ));

    t.set_field(1, 1, "Soil health").unwrap();
    assert!(t.row(1).unwrap().cells.iter().all(|c| !c.disabled));
    t.set_field(1, 2, "DST").unwrap();
}

#[test]
fn impact_factor_drives_naas_rating() {
    let mut t = table_with_rows(TableKind::Publications, 1);

    t.set_field(1, 2, "2.5").unwrap();
    assert_eq!(t.row(1).unwrap().value(3), "8.50");
    assert!(t.row(1).unwrap().cell(3).unwrap().locked);
    assert!(matches!(
        t.set_field(1, 3, "9"),
        Err(AppError::FieldLocked(_))
    ));

    t.set_field(1, 2, "NA").unwrap();
    assert_eq!(t.row(1).unwrap().value(3), "");
    t.set_field(1, 3, "7.10").unwrap();
    assert_eq!(t.row(1).unwrap().value(3), "7.10");
}

#[test]
fn non_numeric_impact_factor_unlocks_rating() {
    let mut t = table_with_rows(TableKind::Publications, 1);
    t.set_field(1, 2, "1.25").unwrap();
    t.set_field(1, 2, "pending").unwrap();

    let cell = t.row(1).unwrap().cell(3).unwrap();
    assert_eq!(cell.value, "7.25");
    assert!(!cell.locked);
}

#[test]
fn naas_rating_rounds_to_two_decimals() {
    assert_eq!(naas_rating("3").as_deref(), Some("9.00"));
    assert_eq!(naas_rating("0.333").as_deref(), Some("6.33"));
    assert_eq!(naas_rating("abc"), None);
}

#[test]
fn date_pair_fills_read_only_duration() {
    let mut t = table_with_rows(TableKind::Projects, 1);
    t.set_field(1, 3, "2024-01-01").unwrap();
    assert_eq!(t.row(1).unwrap().value(5), "");

    t.set_field(1, 4, "2024-01-10").unwrap();
    assert_eq!(t.row(1).unwrap().value(5), "10 days");

    t.set_field(1, 4, "2023-12-01").unwrap();
    assert_eq!(t.row(1).unwrap().value(5), "Invalid dates");

    t.set_field(1, 4, "").unwrap();
    assert_eq!(t.row(1).unwrap().value(5), "");

    assert!(matches!(
        t.set_field(1, 5, "3 days"),
        Err(AppError::FieldLocked(_))
    ));
}

#[test]
fn full_mode_tables_always_decompose() {
    let mut t = table_with_rows(TableKind::Programs, 1);
    t.set_field(1, 2, "2024-01-01").unwrap();
    t.set_field(1, 3, "2024-02-15").unwrap();
    assert_eq!(t.row(1).unwrap().value(4), "1 month, 15 days");
}

#[test]
fn malformed_date_is_rejected() {
    let mut t = table_with_rows(TableKind::Ipr, 1);
    assert!(matches!(
        t.set_field(1, 2, "01/02/2024"),
        Err(AppError::InvalidDate(_))
    ));
}

#[test]
fn persisted_view_skips_empty_rows() {
    let mut t = table_with_rows(TableKind::TechCom, 3);
    t.set_field(2, 2, "Biofertilizer").unwrap();

    assert_eq!(t.rows().len(), 3);
    let stored = t.persisted();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].get(0), "2");
    assert_eq!(stored[0].get(2), "Biofertilizer");
}

#[test]
fn snapshot_serializes_as_col_keys() {
    let mut t = table_with_rows(TableKind::Ipr, 1);
    t.set_field(1, 1, "Patent").unwrap();
    t.set_field(1, 3, "IN-42").unwrap();

    let json = serde_json::to_value(&t.persisted()[0]).unwrap();
    assert_eq!(json["col_0"], "1");
    assert_eq!(json["col_1"], "Patent");
    assert_eq!(json["col_2"], "");
    assert_eq!(json["col_3"], "IN-42");
}

#[test]
fn restored_row_maps_unknown_choice_to_other() {
    let stored: RowSnapshot = serde_json::from_str(
        r#"{"col_0":"1","col_1":"Field day","col_2":"Pulses","col_3":"ICAR",
            "col_4":"2024-02-01","col_5":"2024-02-03","col_6":"3 days","col_7":"40"}"#,
    )
    .unwrap();

    let mut t = TableModel::new(TableKind::Training);
    t.push_restored(&stored);

    let row = t.row(1).unwrap();
    let kind = row.cell(1).unwrap();
    assert_eq!(kind.value, OTHER);
    assert_eq!(kind.detail.as_deref(), Some("Field day"));
    assert_eq!(row.cell(3).unwrap().value, "ICAR");
    assert!(!row.cell(3).unwrap().is_revealed());
    assert_eq!(row.value(6), "3 days");
    assert_eq!(t.persisted()[0], stored);
}

#[test]
fn restored_rows_get_their_flags_back() {
    let na: RowSnapshot = serde_json::from_str(r#"{"col_0":"1","col_1":"NA"}"#).unwrap();
    let mut projects = TableModel::new(TableKind::Projects);
    projects.push_restored(&na);
    assert!(projects.row(1).unwrap().cell(2).unwrap().disabled);

    let paper: RowSnapshot =
        serde_json::from_str(r#"{"col_0":"1","col_1":"Ref","col_2":"2","col_3":"8.00"}"#)
            .unwrap();
    let mut pubs = TableModel::new(TableKind::Publications);
    pubs.push_restored(&paper);
    assert!(pubs.row(1).unwrap().cell(3).unwrap().locked);
}
