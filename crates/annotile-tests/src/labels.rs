//! Label persistence alongside a dataset.

use annotile_core::{Config, PageGrid};
use annotile_labels::LabelTable;

#[test]
fn page_selection_and_export() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    let config = Config::default();
    let grid: PageGrid = config.page_grid();

    let mut table = LabelTable::new(8);
    let changed = table.select_all(grid.clamped_range(2, 8), config.active_label);
    assert_eq!(changed, 2);
    assert_eq!(table.get_label(6), 1);
    assert_eq!(table.get_label(5), 0);

    let names = config.label_names();
    let path = table.export_tsv(tmp.path(), "session", &names).unwrap();
    let text = std::fs::read_to_string(path).unwrap();
    let rows: Vec<&str> = text.lines().collect();
    assert_eq!(rows[0], "id\tlabel\tname");
    assert_eq!(rows[7], "6\t1\tcell");
    assert_eq!(rows.len(), 9);
}

#[test]
fn json_survives_reload() {
    let tmp = tempfile::tempdir().expect("failed to create tempdir");
    let path = tmp.path().join("labels.json");
    let names = Config::default().label_names();

    let mut table = LabelTable::new(5);
    table.flag(0, 2).unwrap();
    table.junk(0).unwrap();
    table.flag(4, 2).unwrap();
    table.save_json(&path, &names).unwrap();

    let (loaded, loaded_names) = LabelTable::load_json(&path).unwrap();
    assert_eq!(loaded.counts(), vec![4, 0, 1]);
    assert_eq!(loaded_names, names);
}
