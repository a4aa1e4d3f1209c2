//! The numbered main menu and one handler per option.
//!
//! Every failure is reported on the output and the loop carries on; the only
//! ways out are option 0 and end of input.

use std::io::{self, BufRead, Write};

use thiserror::Error;

use stockbook_core::{DomainError, ProductId};
use stockbook_infra::{InventoryService, ServiceError, StateStore};
use stockbook_inventory::product::parse_positive;
use stockbook_inventory::{NewProduct, ProductPatch};

use crate::config::AppConfig;
use crate::errors::{domain_error_message, service_error_message};
use crate::prompt::Prompter;
use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    RegisterProduct,
    ListProducts,
    UpdateProduct,
    DeleteProduct,
    ReceiveStock,
    DispatchStock,
    LowStockReport,
    MovementReport,
    ValueReport,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 10] = [
        MenuChoice::RegisterProduct,
        MenuChoice::ListProducts,
        MenuChoice::UpdateProduct,
        MenuChoice::DeleteProduct,
        MenuChoice::ReceiveStock,
        MenuChoice::DispatchStock,
        MenuChoice::LowStockReport,
        MenuChoice::MovementReport,
        MenuChoice::ValueReport,
        MenuChoice::Exit,
    ];

    pub fn parse(input: &str) -> Option<Self> {
        let choice = match input.trim() {
            "1" => MenuChoice::RegisterProduct,
            "2" => MenuChoice::ListProducts,
            "3" => MenuChoice::UpdateProduct,
            "4" => MenuChoice::DeleteProduct,
            "5" => MenuChoice::ReceiveStock,
            "6" => MenuChoice::DispatchStock,
            "7" => MenuChoice::LowStockReport,
            "8" => MenuChoice::MovementReport,
            "9" => MenuChoice::ValueReport,
            "0" => MenuChoice::Exit,
            _ => return None,
        };
        Some(choice)
    }

    pub fn key(&self) -> char {
        match self {
            MenuChoice::RegisterProduct => '1',
            MenuChoice::ListProducts => '2',
            MenuChoice::UpdateProduct => '3',
            MenuChoice::DeleteProduct => '4',
            MenuChoice::ReceiveStock => '5',
            MenuChoice::DispatchStock => '6',
            MenuChoice::LowStockReport => '7',
            MenuChoice::MovementReport => '8',
            MenuChoice::ValueReport => '9',
            MenuChoice::Exit => '0',
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::RegisterProduct => "Register product",
            MenuChoice::ListProducts => "List products",
            MenuChoice::UpdateProduct => "Update product",
            MenuChoice::DeleteProduct => "Delete product",
            MenuChoice::ReceiveStock => "Stock in",
            MenuChoice::DispatchStock => "Stock out",
            MenuChoice::LowStockReport => "Report - low stock",
            MenuChoice::MovementReport => "Report - movements",
            MenuChoice::ValueReport => "Report - stock value",
            MenuChoice::Exit => "Exit",
        }
    }
}

#[derive(Debug, Error)]
enum MenuError {
    #[error("input closed")]
    InputClosed,

    #[error(transparent)]
    Io(#[from] io::Error),
}

type MenuResult<T = ()> = Result<T, MenuError>;

pub struct Menu<S: StateStore, R, W> {
    service: InventoryService<S>,
    prompt: Prompter<R, W>,
    config: AppConfig,
}

impl<S, R, W> Menu<S, R, W>
where
    S: StateStore,
    R: BufRead,
    W: Write,
{
    pub fn new(service: InventoryService<S>, prompt: Prompter<R, W>, config: AppConfig) -> Self {
        Self {
            service,
            prompt,
            config,
        }
    }

    pub fn into_parts(self) -> (InventoryService<S>, Prompter<R, W>) {
        (self.service, self.prompt)
    }

    /// Run until the exit option is chosen or input ends.
    pub fn run(&mut self) -> io::Result<()> {
        match self.run_loop() {
            Ok(()) | Err(MenuError::InputClosed) => {
                self.prompt.say("\nGoodbye!")?;
                Ok(())
            }
            Err(MenuError::Io(e)) => Err(e),
        }
    }

    fn run_loop(&mut self) -> MenuResult {
        loop {
            self.show_menu()?;
            let input = self.ask("Choose an option: ")?;

            match MenuChoice::parse(&input) {
                Some(MenuChoice::Exit) => return Ok(()),
                Some(choice) => {
                    tracing::debug!(option = %choice.key(), "menu option selected");
                    self.dispatch(choice)?;
                }
                None => self.prompt.say("\nInvalid option!")?,
            }

            self.ask("\nPress ENTER to continue...")?;
        }
    }

    fn show_menu(&mut self) -> MenuResult {
        let bar = "=".repeat(50);
        self.prompt.say(format!("\n{bar}"))?;
        self.prompt.say("          STOCKBOOK - MAIN MENU")?;
        self.prompt.say(&bar)?;
        for choice in MenuChoice::ALL {
            self.prompt.say(format!("{}.  {}", choice.key(), choice.label()))?;
        }
        self.prompt.say(&bar)?;
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> MenuResult {
        match choice {
            MenuChoice::RegisterProduct => self.register_product(),
            MenuChoice::ListProducts => self.list_products(),
            MenuChoice::UpdateProduct => self.update_product(),
            MenuChoice::DeleteProduct => self.delete_product(),
            MenuChoice::ReceiveStock => self.receive_stock(),
            MenuChoice::DispatchStock => self.dispatch_stock(),
            MenuChoice::LowStockReport => self.low_stock_report(),
            MenuChoice::MovementReport => self.movement_report(),
            MenuChoice::ValueReport => self.value_report(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn ask(&mut self, label: &str) -> MenuResult<String> {
        self.prompt.ask(label)?.ok_or(MenuError::InputClosed)
    }

    fn error(&mut self, message: impl AsRef<str>) -> MenuResult {
        self.prompt.say(format!("Error: {}", message.as_ref()))?;
        Ok(())
    }

    /// Report a failed service call. Storage failures are also logged.
    fn service_failure(&mut self, err: &ServiceError) -> MenuResult {
        if !err.is_user_error() {
            tracing::error!(error = %err, "storage failure");
        }
        self.error(service_error_message(err))
    }

    /// Ask for a product id and resolve it, reporting unknown ids.
    fn ask_product(&mut self, label: &str) -> MenuResult<Option<ProductId>> {
        let raw = self.ask(label)?;
        let id = raw.parse::<ProductId>().ok().filter(|id| self.service.lookup(id).is_some());
        if id.is_none() {
            self.error(format!("Product not found: {}", raw.trim().to_uppercase()))?;
        }
        Ok(id)
    }

    fn register_product(&mut self) -> MenuResult {
        self.prompt.say("\n=== REGISTER NEW PRODUCT ===")?;

        let name = self.ask("Product name: ")?;
        if name.trim().is_empty() {
            return self.error("Name cannot be empty!");
        }
        let price = self.ask("Unit price: ")?;
        let quantity = self.ask("Initial quantity: ")?;
        let min_stock = self.ask("Minimum stock: ")?;
        let category = self.ask("Category: ")?;
        let supplier = self.ask("Supplier: ")?;

        let new = match NewProduct::parse(&name, &price, &quantity, &min_stock, &category, &supplier) {
            Ok(new) => new,
            Err(e) => return self.error(domain_error_message(&e)),
        };
        match self.service.register(new) {
            Ok(id) => self.prompt.say(format!("\nProduct registered! ID: {id}"))?,
            Err(e) => self.service_failure(&e)?,
        }
        Ok(())
    }

    fn list_products(&mut self) -> MenuResult {
        if self.service.ledger().is_empty() {
            self.prompt.say("\nNo products registered!")?;
            return Ok(());
        }
        self.prompt.say("\n=== PRODUCTS ===")?;
        let table = render::product_list(self.service.ledger().list());
        write!(self.prompt_output(), "{table}")?;
        Ok(())
    }

    fn update_product(&mut self) -> MenuResult {
        self.list_products()?;
        let Some(id) = self.ask_product("\nProduct ID: ")? else {
            return Ok(());
        };
        let Some(current) = self.service.lookup(&id).cloned() else {
            return Ok(());
        };

        self.prompt.say(format!("\n=== UPDATING: {} ===", current.name()))?;
        self.prompt.say("(Leave blank to keep the current value)")?;
        let patch = ProductPatch {
            name: Some(self.ask(&format!("Name [{}]: ", current.name()))?),
            unit_price: Some(self.ask(&format!(
                "Price [{}]: ",
                render::money(current.unit_price())
            ))?),
            min_stock: Some(self.ask(&format!("Minimum stock [{}]: ", current.min_stock()))?),
            category: Some(self.ask(&format!("Category [{}]: ", current.category()))?),
            supplier: Some(self.ask(&format!("Supplier [{}]: ", current.supplier()))?),
        };

        match self.service.update(&id, &patch) {
            Ok(outcome) => {
                for rejected in &outcome.rejected {
                    self.prompt.say(format!(
                        "Warning: {} not changed ({})",
                        rejected.field, rejected.reason
                    ))?;
                }
                self.prompt.say("\nProduct updated!")?;
            }
            Err(e) => self.service_failure(&e)?,
        }
        Ok(())
    }

    fn delete_product(&mut self) -> MenuResult {
        self.list_products()?;
        let Some(id) = self.ask_product("\nID of the product to delete: ")? else {
            return Ok(());
        };
        let name = self
            .service
            .lookup(&id)
            .map(|p| p.name().to_string())
            .unwrap_or_default();

        let answer = self.ask(&format!("Confirm deletion of '{name}'? (Y/N): "))?;
        if !matches!(answer.trim().to_uppercase().as_str(), "Y" | "S") {
            self.prompt.say("Operation cancelled")?;
            return Ok(());
        }
        match self.service.delete(&id) {
            Ok(_) => self.prompt.say("Product deleted!")?,
            Err(e) => self.service_failure(&e)?,
        }
        Ok(())
    }

    fn receive_stock(&mut self) -> MenuResult {
        self.list_products()?;
        let Some(id) = self.ask_product("\nProduct ID: ")? else {
            return Ok(());
        };
        let raw = self.ask("Quantity received: ")?;
        let quantity = match parse_positive("quantity", &raw) {
            Ok(q) => q,
            Err(e) => return self.error(domain_error_message(&e)),
        };
        let note = self.ask("Note (optional): ")?;

        match self.service.receive_stock(&id, quantity, &note) {
            Ok(out) => self.prompt.say(format!(
                "\nStock in recorded ({}). Current stock: {}",
                out.movement_id, out.adjustment.on_hand
            ))?,
            Err(e) => self.service_failure(&e)?,
        }
        Ok(())
    }

    fn dispatch_stock(&mut self) -> MenuResult {
        self.list_products()?;
        let Some(id) = self.ask_product("\nProduct ID: ")? else {
            return Ok(());
        };
        let raw = self.ask("Quantity out: ")?;
        let quantity = match parse_positive("quantity", &raw) {
            Ok(q) => q,
            Err(e) => return self.error(domain_error_message(&e)),
        };
        if let Some(available) = self.service.lookup(&id).map(|p| p.quantity()) {
            if quantity > available {
                let err = DomainError::insufficient_stock(id.to_string(), available, quantity);
                return self.error(domain_error_message(&err));
            }
        }
        let note = self.ask("Note (optional): ")?;

        match self.service.dispatch_stock(&id, quantity, &note) {
            Ok(out) => {
                self.prompt.say(format!(
                    "\nStock out recorded ({}). Current stock: {}",
                    out.movement_id, out.adjustment.on_hand
                ))?;
                if out.low_stock_alert() {
                    self.prompt.say(format!(
                        "ALERT: stock at or below minimum ({})!",
                        out.adjustment.min_stock
                    ))?;
                }
            }
            Err(e) => self.service_failure(&e)?,
        }
        Ok(())
    }

    fn low_stock_report(&mut self) -> MenuResult {
        self.prompt.say("\n=== LOW STOCK PRODUCTS ===")?;
        let report = self.service.low_stock_report();
        if report.is_empty() {
            self.prompt.say("No products with low stock!")?;
            return Ok(());
        }
        let table = render::low_stock(&report);
        write!(self.prompt_output(), "{table}")?;
        Ok(())
    }

    fn movement_report(&mut self) -> MenuResult {
        let report = self.service.movement_report(self.config.recent_movements);
        if report.is_empty() {
            self.prompt.say("\nNo movements recorded!")?;
            return Ok(());
        }
        self.prompt.say("\n=== MOVEMENT HISTORY ===")?;
        let table = render::movements(&report);
        write!(self.prompt_output(), "{table}")?;
        Ok(())
    }

    fn value_report(&mut self) -> MenuResult {
        self.prompt.say("\n=== TOTAL STOCK VALUE ===")?;
        match self.service.value_report() {
            Ok(report) => {
                let table = render::value(&report);
                write!(self.prompt_output(), "{table}")?;
            }
            Err(e) => self.service_failure(&e)?,
        }
        Ok(())
    }

    fn prompt_output(&mut self) -> &mut W {
        self.prompt.output()
    }
}
