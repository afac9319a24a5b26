use chrono::NaiveDate;
use serde::Serialize;

use sexyboom_clients::Client;
use sexyboom_core::{ClientId, DomainError, DomainResult, Entity, ProductId, SalesNoteId, ValueObject, is_valid_price};
use sexyboom_products::Product;

/// Round a currency amount to cents.
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Payment state of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

/// Order (delivery) state of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Closed,
}

/// One product line on a sales note.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesNoteLine {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u64,
    pub unit_price: f64,
    /// Product cost at the time the note was opened.
    pub unit_cost: f64,
    pub size: String,
    pub color: String,
    pub subtotal: f64,
}

impl ValueObject for SalesNoteLine {}

impl SalesNoteLine {
    /// Build a line for `product`, checking quantity, price and availability.
    pub fn new(
        product: &Product,
        quantity: u64,
        unit_price: f64,
        size: impl Into<String>,
        color: impl Into<String>,
    ) -> DomainResult<Self> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }
        if !is_valid_price(unit_price) || !unit_price.is_finite() {
            return Err(DomainError::validation(format!(
                "unit_price must be a non-negative number (got {unit_price})"
            )));
        }
        product.ensure_available(quantity)?;

        Ok(Self {
            product_id: product.id(),
            product_name: product.name().to_string(),
            quantity,
            unit_price,
            unit_cost: product.cost(),
            size: size.into(),
            color: color.into(),
            subtotal: round_currency(unit_price * quantity as f64),
        })
    }

    /// Acquisition cost of the units on this line.
    pub fn cost(&self) -> f64 {
        self.unit_cost * self.quantity as f64
    }
}

/// A sales note: what a client ordered, at which prices, and whether it is paid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesNote {
    id: SalesNoteId,
    client_id: ClientId,
    client_name: String,
    created_on: NaiveDate,
    sold_on: Option<NaiveDate>,
    status: PaymentStatus,
    order_status: OrderStatus,
    notes: Option<String>,
    lines: Vec<SalesNoteLine>,
    total: f64,
}

impl SalesNote {
    /// Open a pending note for `client`.
    pub fn open(
        id: SalesNoteId,
        client: &Client,
        lines: Vec<SalesNoteLine>,
        notes: Option<String>,
        created_on: NaiveDate,
    ) -> DomainResult<Self> {
        if lines.is_empty() {
            return Err(DomainError::validation("a sales note needs at least one line"));
        }
        let total = round_currency(lines.iter().map(|line| line.subtotal).sum());
        let notes = notes.filter(|n| !n.trim().is_empty());

        Ok(Self {
            id,
            client_id: client.id(),
            client_name: client.name().to_string(),
            created_on,
            sold_on: None,
            status: PaymentStatus::Pending,
            order_status: OrderStatus::Open,
            notes,
            lines,
            total,
        })
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn created_on(&self) -> NaiveDate {
        self.created_on
    }

    pub fn sold_on(&self) -> Option<NaiveDate> {
        self.sold_on
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn order_status(&self) -> OrderStatus {
        self.order_status
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn lines(&self) -> &[SalesNoteLine] {
        &self.lines
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }

    /// Acquisition cost of everything on the note.
    pub fn cost(&self) -> f64 {
        self.lines.iter().map(SalesNoteLine::cost).sum()
    }

    /// Mark the note as paid on `sold_on` and close the order.
    ///
    /// Stock movement is the caller's job; this only transitions state.
    pub fn confirm(&mut self, sold_on: NaiveDate) -> DomainResult<()> {
        if self.is_paid() {
            return Err(DomainError::conflict(format!("sales note {} is already paid", self.id)));
        }
        self.status = PaymentStatus::Paid;
        self.order_status = OrderStatus::Closed;
        self.sold_on = Some(sold_on);
        Ok(())
    }
}

impl Entity for SalesNote {
    type Id = SalesNoteId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
