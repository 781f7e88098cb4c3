//! The interactive screen loop.
//!
//! Each pass clears the terminal, renders the cart and totals, and offers a
//! menu of actions. Item entry walks the three form fields through
//! [`CartSession`] and commits; edit, delete, and clear act on the
//! [`CartStore`] directly. Every cart change is saved before the next frame.

use anyhow::Result;
use console::{Term, style};
use dialoguer::{Input, Select, theme::ColorfulTheme};
use tracing::{debug, info, warn};

use cart_core::currency::format_php;
use cart_core::models::{CartItem, Town};
use cart_core::totals::CheckoutSummary;
use cart_core::{CartError, CartSession, CartStore, Commit, EditMode, InputField};

use crate::render;

/// Payment choices offered at checkout. The selection is mirrored back in
/// the menu label and routed through the session's change handler, but it
/// affects no totals and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Gcash,
    CreditCard,
}

impl PaymentMethod {
    pub fn all() -> &'static [PaymentMethod] {
        &[PaymentMethod::Gcash, PaymentMethod::CreditCard]
    }

    /// Stable identifier, the value a form would submit.
    pub fn id(&self) -> &'static str {
        match self {
            PaymentMethod::Gcash => "gcash",
            PaymentMethod::CreditCard => "creditcard",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Gcash => "GCash",
            PaymentMethod::CreditCard => "Credit Card",
        }
    }
}

/// Actions available from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Commit,
    EditRow,
    DeleteRow,
    ClearCart,
    ChooseTown,
    ChoosePayment,
    Quit,
}

/// Builds the menu for the current state. The commit entry doubles as the
/// mode indicator: it reads "Add to Cart" or "Update Item (row N)". Row
/// actions only appear when the cart has rows.
fn menu_entries(
    mode: EditMode,
    cart_len: usize,
    payment: PaymentMethod,
) -> Vec<(String, MenuAction)> {
    let commit_label = match mode {
        EditMode::Adding => "Add to Cart".to_string(),
        EditMode::Editing(index) => format!("Update Item (row {})", index + 1),
    };

    let mut entries = vec![(commit_label, MenuAction::Commit)];
    if cart_len > 0 {
        entries.push(("Edit a row".to_string(), MenuAction::EditRow));
        entries.push(("Delete a row".to_string(), MenuAction::DeleteRow));
        entries.push(("Clear the cart".to_string(), MenuAction::ClearCart));
    }
    entries.push(("Deliver to a town".to_string(), MenuAction::ChooseTown));
    entries.push((
        format!("Payment method: {}", payment.label()),
        MenuAction::ChoosePayment,
    ));
    entries.push(("Quit".to_string(), MenuAction::Quit));
    entries
}

fn row_labels(items: &[CartItem]) -> Vec<String> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            format!(
                "{}. {} ({} x {})",
                i + 1,
                item.name,
                format_php(item.price),
                item.quantity
            )
        })
        .collect()
}

fn town_labels(towns: &[Town]) -> Vec<String> {
    towns
        .iter()
        .map(|town| format!("{} ({})", town.name, format_php(town.fee)))
        .collect()
}

/// Top-level application state: the persisted cart, the form session, the
/// inert payment choice, and a one-shot notice shown on the next frame.
pub struct CartApp {
    store: CartStore,
    session: CartSession,
    payment: PaymentMethod,
    notice: Option<String>,
}

impl CartApp {
    pub fn new(store: CartStore, session: CartSession) -> Self {
        Self {
            store,
            session,
            payment: PaymentMethod::default(),
            notice: None,
        }
    }

    /// Runs the screen loop until the user quits.
    pub async fn run(mut self) -> Result<()> {
        let term = Term::stdout();
        loop {
            term.clear_screen()?;
            self.print_screen();

            match self.main_menu()? {
                MenuAction::Commit => {
                    self.prompt_item_fields()?;
                    self.commit_form().await?;
                }
                MenuAction::EditRow => self.choose_row_to_edit()?,
                MenuAction::DeleteRow => self.delete_row().await?,
                MenuAction::ClearCart => self.clear_cart().await?,
                MenuAction::ChooseTown => self.choose_town()?,
                MenuAction::ChoosePayment => self.choose_payment()?,
                MenuAction::Quit => break,
            }
        }
        Ok(())
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    fn print_screen(&mut self) {
        println!("{}", style("Shopping Cart").bold().underlined());
        println!();

        if self.store.is_empty() {
            println!("Your cart is empty.");
        } else {
            println!("{}", render::cart_table(self.store.items()));
            let summary =
                CheckoutSummary::compute(self.store.items(), self.session.shipping_fee());
            println!("{}", render::totals_block(&summary));
        }

        if let Some(notice) = self.notice.take() {
            println!();
            println!("{}", style(notice).red());
        }
        println!();
    }

    fn main_menu(&self) -> Result<MenuAction> {
        let entries = menu_entries(self.session.mode(), self.store.len(), self.payment);
        let labels: Vec<&String> = entries.iter().map(|(label, _)| label).collect();

        let pick = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What next?")
            .items(&labels)
            .default(0)
            .interact()?;

        Ok(entries[pick].1)
    }

    /// Walks the three item fields. Each prompt starts from the session's
    /// current value, so editing shows the loaded row and a failed commit
    /// shows what was typed. Empty answers are allowed; the commit guard
    /// decides what they mean.
    fn prompt_item_fields(&mut self) -> Result<()> {
        let theme = ColorfulTheme::default();

        let name: String = Input::with_theme(&theme)
            .with_prompt("Item name")
            .with_initial_text(self.session.name())
            .allow_empty(true)
            .interact_text()?;
        self.session.on_field_change(InputField::Name, &name);

        let price: String = Input::with_theme(&theme)
            .with_prompt("Price")
            .with_initial_text(self.session.price())
            .allow_empty(true)
            .interact_text()?;
        self.session.on_field_change(InputField::Price, &price);

        let quantity: String = Input::with_theme(&theme)
            .with_prompt("Quantity")
            .with_initial_text(self.session.quantity())
            .allow_empty(true)
            .interact_text()?;
        self.session.on_field_change(InputField::Quantity, &quantity);

        Ok(())
    }

    async fn commit_form(&mut self) -> Result<()> {
        match self.session.commit() {
            Ok(Commit::Append(item)) => {
                info!(name = %item.name, "adding cart row");
                self.store.add(item).await?;
            }
            Ok(Commit::Replace { index, item }) => match self.store.update(index, item).await {
                Ok(()) => info!(row = index + 1, "cart row updated"),
                Err(CartError::OutOfBounds { index, len }) => {
                    warn!(index, len, "edited row no longer exists, dropping the update");
                }
                Err(e) => return Err(e.into()),
            },
            Ok(Commit::Incomplete) => {
                debug!("nothing committed, form incomplete");
            }
            Err(e) => {
                self.notify(e.to_string());
            }
        }
        Ok(())
    }

    fn pick_row(&self, prompt: &str) -> Result<usize> {
        let labels = row_labels(self.store.items());
        let pick = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact()?;
        Ok(pick)
    }

    fn choose_row_to_edit(&mut self) -> Result<()> {
        let pick = self.pick_row("Edit which row?")?;
        if let Some(item) = self.store.get(pick) {
            self.session.begin_edit(pick, item);
        }
        Ok(())
    }

    async fn delete_row(&mut self) -> Result<()> {
        let pick = self.pick_row("Delete which row?")?;
        let removed = self.store.remove(pick).await?;
        info!(name = %removed.name, "cart row removed");
        // Deleting does not retarget an in-progress edit; a commit aimed at
        // a row that no longer exists is dropped at commit time.
        Ok(())
    }

    async fn clear_cart(&mut self) -> Result<()> {
        self.store.clear().await?;
        info!("cart cleared");
        Ok(())
    }

    fn choose_town(&mut self) -> Result<()> {
        let towns = self.session.shipping_table().towns().to_vec();
        let labels = town_labels(&towns);

        let pick = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Deliver to which town?")
            .items(&labels)
            .default(0)
            .interact()?;

        self.session
            .on_field_change(InputField::Town, &towns[pick].name);
        Ok(())
    }

    fn choose_payment(&mut self) -> Result<()> {
        let options = PaymentMethod::all();
        let labels: Vec<&str> = options.iter().map(|p| p.label()).collect();
        let current = options.iter().position(|p| *p == self.payment).unwrap_or(0);

        let pick = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Payment method")
            .items(&labels)
            .default(current)
            .interact()?;

        self.payment = options[pick];
        // Same change handler the text inputs use; the value is inert.
        self.session
            .on_field_change(InputField::Payment, options[pick].id());
        debug!(method = options[pick].id(), "payment method selected");
        Ok(())
    }
}
