//! Scripted sessions through the interactive menu.
//!
//! Each test feeds the menu a fixed stdin transcript and checks what the user
//! would see, plus the state left behind in the service.

use std::io::Cursor;
use std::sync::Arc;

use stockbook_cli::{AppConfig, Menu, Prompter};
use stockbook_core::{MovementId, ProductId, SequenceId};
use stockbook_infra::{InMemoryStateStore, InventoryService, JsonFileStore, StateStore};

fn run_session<S: StateStore>(service: InventoryService<S>, script: &str) -> (InventoryService<S>, String) {
    let prompt = Prompter::new(Cursor::new(script.to_string()), Vec::new());
    let mut menu = Menu::new(service, prompt, AppConfig::default());
    menu.run().unwrap();

    let (service, prompt) = menu.into_parts();
    let (_, out) = prompt.into_inner();
    (service, String::from_utf8(out).unwrap())
}

fn fresh() -> InventoryService<Arc<InMemoryStateStore>> {
    InventoryService::open(Arc::new(InMemoryStateStore::new())).unwrap()
}

const REGISTER_WIDGET: &str = "1\nWidget\n10.00\n50\n5\nTools\nAcme\n\n";

#[test]
fn widget_lifecycle() {
    let script = [
        REGISTER_WIDGET,
        "6\nP001\n45\nsold\n\n",
        "6\np001\n10\n\n",
        "7\n\n",
        "4\nP001\nY\n\n",
        "8\n\n",
        "0\n",
    ]
    .concat();

    let (service, out) = run_session(fresh(), &script);

    assert!(out.contains("Product registered! ID: P001"));
    assert!(out.contains("Stock out recorded (M0002). Current stock: 5"));
    assert!(out.contains("ALERT: stock at or below minimum (5)!"));
    assert!(out.contains("Insufficient stock! Available: 5"));
    assert!(out.contains("LOW"));
    assert!(out.contains("Product deleted!"));
    assert!(out.contains("N/A"));
    assert!(out.trim_end().ends_with("Goodbye!"));

    assert!(service.lookup(&ProductId::from_seq(1)).is_none());
    assert_eq!(service.movements().len(), 2);
    assert!(service.movements().get(&MovementId::from_seq(2)).is_some());
}

#[test]
fn invalid_register_input_changes_nothing() {
    let script = ["1\n\n\n", "1\nBolt\nabc\n1\n1\n\n\n\n", "0\n"].concat();
    let (service, out) = run_session(fresh(), &script);

    assert!(out.contains("Error: Name cannot be empty!"));
    assert!(out.contains("Error: Invalid input: unit price is not a number"));
    assert!(service.ledger().is_empty());
    assert!(service.movements().is_empty());
}

#[test]
fn unknown_option_and_unknown_product_keep_looping() {
    let script = ["42\n\n", "5\nP404\n\n", "0\n"].concat();
    let (_, out) = run_session(fresh(), &script);

    assert!(out.contains("Invalid option!"));
    assert!(out.contains("Error: Product not found: P404"));
    assert!(out.contains("No products registered!"));
}

#[test]
fn update_reports_bad_field_and_applies_the_rest() {
    let script = [REGISTER_WIDGET, "3\nP001\nGizmo\n-4\n\n\nInitech\n\n", "0\n"].concat();
    let (service, out) = run_session(fresh(), &script);

    assert!(out.contains("Warning: unit price not changed (unit price must not be negative)"));
    assert!(out.contains("Product updated!"));

    let p = service.lookup(&ProductId::from_seq(1)).unwrap();
    assert_eq!(p.name(), "Gizmo");
    assert_eq!(p.supplier(), "Initech");
    assert_eq!(p.category(), "Tools");
    assert_eq!(p.quantity(), 50);
}

#[test]
fn delete_requires_confirmation() {
    let script = [REGISTER_WIDGET, "4\nP001\nn\n\n", "0\n"].concat();
    let (service, out) = run_session(fresh(), &script);

    assert!(out.contains("Operation cancelled"));
    assert!(service.lookup(&ProductId::from_seq(1)).is_some());
}

#[test]
fn stock_in_rejects_non_positive_quantity() {
    let script = [REGISTER_WIDGET, "5\nP001\n0\n\n", "5\nP001\n3\nrestock\n\n", "0\n"].concat();
    let (service, out) = run_session(fresh(), &script);

    assert!(out.contains("Error: Invalid input: quantity must be greater than zero"));
    assert!(out.contains("Stock in recorded (M0002). Current stock: 53"));
    assert_eq!(service.movements().len(), 2);
}

#[test]
fn reports_on_empty_inventory() {
    let script = ["7\n\n", "8\n\n", "9\n\n", "0\n"].concat();
    let (_, out) = run_session(fresh(), &script);

    assert!(out.contains("No products with low stock!"));
    assert!(out.contains("No movements recorded!"));
    assert!(out.contains("Total stock value: 0.00"));
}

#[test]
fn value_report_groups_thousands() {
    let script = ["1\nServer\n1250.50\n2\n0\n\n\n\n", "9\n\n", "0\n"].concat();
    let (_, out) = run_session(fresh(), &script);

    assert!(out.contains("Total units: 2"));
    assert!(out.contains("Total stock value: 2,501.00"));
    assert!(out.contains("1250.50"));
}

#[test]
fn value_report_survives_oversized_line() {
    let script = [
        "1\nVault\n79228162514264337593543950335\n2\n0\n\n\n\n",
        "9\n\n",
        "0\n",
    ]
    .concat();
    let (_, out) = run_session(fresh(), &script);

    assert!(out.contains("Error: Invalid input: stock value is too large to compute"));
    assert!(out.trim_end().ends_with("Goodbye!"));
}

#[test]
fn value_report_survives_oversized_total() {
    let register = "1\nBar\n50000000000000000000000000000\n1\n0\n\n\n\n";
    let script = [register, register, "9\n\n", "0\n"].concat();
    let (service, out) = run_session(fresh(), &script);

    assert_eq!(service.ledger().len(), 2);
    assert!(out.contains("Error: Invalid input: total stock value is too large to compute"));
    assert!(out.trim_end().ends_with("Goodbye!"));
}

#[test]
fn stock_out_beyond_available_is_refused() {
    let script = [REGISTER_WIDGET, "6\nP001\n51\n\n", "0\n"].concat();
    let (service, out) = run_session(fresh(), &script);

    assert!(out.contains("Error: Insufficient stock! Available: 50"));
    assert_eq!(service.lookup(&ProductId::from_seq(1)).unwrap().quantity(), 50);
    assert_eq!(service.movements().len(), 1);
}

#[test]
fn end_of_input_exits_cleanly() {
    let (_, out) = run_session(fresh(), "2\n");
    assert!(out.trim_end().ends_with("Goodbye!"));
}

#[test]
fn session_state_is_on_disk_for_the_next_run() {
    let dir = tempfile::tempdir().unwrap();

    let service = InventoryService::open(JsonFileStore::open(dir.path()).unwrap()).unwrap();
    run_session(service, &[REGISTER_WIDGET, "0\n"].concat());

    let service = InventoryService::open(JsonFileStore::open(dir.path()).unwrap()).unwrap();
    let (service, out) = run_session(service, "2\n\n0\n");

    assert!(out.contains("Widget"));
    assert_eq!(service.movements().len(), 1);
    assert!(dir.path().join("products.json").exists());
    assert!(dir.path().join("movements.json").exists());
}
