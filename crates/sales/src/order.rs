use serde::{Deserialize, Serialize};

use storefront_core::{Aggregate, AggregateRoot, DomainError, DomainResult, OrderId};
use storefront_events::Event;
use storefront_inventory::{Catalog, ItemId};

/// Order lifecycle. `Open → Finalized` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Finalized,
}

/// Order line: a reserved quantity of one catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub quantity: i64,
}

/// Aggregate root: Order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    id: OrderId,
    status: OrderStatus,
    lines: Vec<OrderLine>,
    version: u64,
}

impl Order {
    /// Validate `id` and open an empty order.
    pub fn new(id: i64) -> DomainResult<Self> {
        Ok(Self::open(OrderId::new(id)?))
    }

    pub fn open(id: OrderId) -> Self {
        Self {
            id,
            status: OrderStatus::Open,
            lines: Vec::new(),
            version: 0,
        }
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn is_finalized(&self) -> bool {
        self.status == OrderStatus::Finalized
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Reserve `quantity` units of `item_id` and record them as a new line.
    ///
    /// Any stock failure surfaces as `"Insufficient stock for <name>"`. Adding an
    /// item that already has a line appends a second line.
    pub fn add_product(
        &mut self,
        catalog: &mut Catalog,
        item_id: ItemId,
        quantity: i64,
    ) -> DomainResult<()> {
        self.ensure_open()?;

        let item = catalog.item_mut(item_id)?;
        item.reduce_stock(quantity).map_err(|cause| {
            tracing::warn!(
                order_id = %self.id,
                item_id = %item_id,
                quantity,
                %cause,
                "stock reservation rejected"
            );
            DomainError::stock(format!("Insufficient stock for {}", item.name()))
        })?;

        let cmd = OrderCommand::AddLine(AddLine {
            order_id: self.id,
            item_id,
            quantity,
        });
        let events = match self.handle(&cmd) {
            Ok(events) => events,
            Err(err) => {
                item.increase_stock(quantity)?;
                return Err(err);
            }
        };
        for event in &events {
            self.apply(event);
        }

        tracing::debug!(order_id = %self.id, item_id = %item_id, quantity, "stock reserved for order line");
        Ok(())
    }

    /// Release up to `quantity` units of the first line holding `item_id`.
    ///
    /// Asking for more than the line holds releases the whole line. An item
    /// without a line is a no-op.
    pub fn remove_product(
        &mut self,
        catalog: &mut Catalog,
        item_id: ItemId,
        quantity: i64,
    ) -> DomainResult<()> {
        let cmd = OrderCommand::ReduceLine(ReduceLine {
            order_id: self.id,
            item_id,
            quantity,
        });
        let events = self.handle(&cmd)?;

        for event in &events {
            if let OrderEvent::LineReduced(e) = event {
                catalog.item_mut(e.item_id)?.increase_stock(e.released)?;
            }
        }
        for event in &events {
            self.apply(event);
        }

        if !events.is_empty() {
            tracing::debug!(order_id = %self.id, item_id = %item_id, quantity, "stock released from order line");
        }
        Ok(())
    }

    /// Lock the order. Finalizing a finalized order is a no-op.
    pub fn finalize(&mut self) -> DomainResult<()> {
        let cmd = OrderCommand::FinalizeOrder(FinalizeOrder { order_id: self.id });
        let events = self.execute(&cmd)?;
        if !events.is_empty() {
            tracing::debug!(order_id = %self.id, lines = self.lines.len(), "order finalized");
        }
        Ok(())
    }

    /// Flag-style access to the lifecycle: `true` locks the order without the
    /// non-empty check of [`Order::finalize`], `false` is only accepted while the
    /// order is still open.
    pub fn set_finalized(&mut self, finalized: bool) -> DomainResult<()> {
        match (finalized, self.status) {
            (true, _) => {
                let cmd = OrderCommand::MarkFinalized(MarkFinalized { order_id: self.id });
                let events = self.execute(&cmd)?;
                if !events.is_empty() {
                    tracing::debug!(order_id = %self.id, lines = self.lines.len(), "order marked finalized");
                }
                Ok(())
            }
            (false, OrderStatus::Open) => Ok(()),
            (false, OrderStatus::Finalized) => Err(DomainError::order_state(
                "Finalized order cannot be reopened",
            )),
        }
    }

    /// Sum of `current_price × quantity` using the catalog's live prices.
    pub fn total(&self, catalog: &Catalog) -> DomainResult<f64> {
        self.lines
            .iter()
            .try_fold(0.0_f64, |acc, line| -> DomainResult<f64> {
                let item = catalog.item(line.item_id)?;
                Ok(acc + item.current_price() * line.quantity as f64)
            })
    }

    /// Multi-line, human-readable summary of the order.
    pub fn summary(&self, catalog: &Catalog) -> DomainResult<String> {
        let products = if self.lines.is_empty() {
            "No products found".to_string()
        } else {
            self.lines
                .iter()
                .map(|line| -> DomainResult<String> {
                    let item = catalog.item(line.item_id)?;
                    let quantity = if line.quantity > 0 {
                        line.quantity.to_string()
                    } else {
                        "not found".to_string()
                    };
                    Ok(format!("{}, Quantity: {quantity}", item.describe()))
                })
                .collect::<DomainResult<Vec<_>>>()?
                .join("\n")
        };

        let total = self.total(catalog)?;
        let finalized = if self.is_finalized() { "Yes" } else { "No" };

        Ok(format!(
            "Order ID: {}\nItems:\n{products}\nTotal: {total:.2}\nFinalized: {finalized}",
            self.id
        ))
    }
}

impl AggregateRoot for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: AddLine.
///
/// Records a line only; stock must already be reserved by the caller
/// (see [`Order::add_product`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLine {
    pub order_id: OrderId,
    pub item_id: ItemId,
    pub quantity: i64,
}

/// Command: ReduceLine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReduceLine {
    pub order_id: OrderId,
    pub item_id: ItemId,
    pub quantity: i64,
}

/// Command: FinalizeOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeOrder {
    pub order_id: OrderId,
}

/// Command: MarkFinalized. Like `FinalizeOrder`, but accepts an empty order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkFinalized {
    pub order_id: OrderId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderCommand {
    AddLine(AddLine),
    ReduceLine(ReduceLine),
    FinalizeOrder(FinalizeOrder),
    MarkFinalized(MarkFinalized),
}

/// Event: LineAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAdded {
    pub order_id: OrderId,
    pub item_id: ItemId,
    pub quantity: i64,
}

/// Event: LineReduced. `released` units went back to the item's stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineReduced {
    pub order_id: OrderId,
    pub item_id: ItemId,
    pub released: i64,
}

/// Event: OrderFinalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFinalized {
    pub order_id: OrderId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    LineAdded(LineAdded),
    LineReduced(LineReduced),
    OrderFinalized(OrderFinalized),
}

impl Event for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::LineAdded(_) => "sales.order.line_added",
            OrderEvent::LineReduced(_) => "sales.order.line_reduced",
            OrderEvent::OrderFinalized(_) => "sales.order.finalized",
        }
    }
}

impl Aggregate for Order {
    type Command = OrderCommand;
    type Event = OrderEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            OrderEvent::LineAdded(e) => {
                self.lines.push(OrderLine {
                    item_id: e.item_id,
                    quantity: e.quantity,
                });
            }
            OrderEvent::LineReduced(e) => {
                if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == e.item_id) {
                    line.quantity -= e.released;
                }
                self.lines.retain(|l| l.quantity > 0);
            }
            OrderEvent::OrderFinalized(_) => {
                self.status = OrderStatus::Finalized;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            OrderCommand::AddLine(cmd) => self.handle_add_line(cmd),
            OrderCommand::ReduceLine(cmd) => self.handle_reduce_line(cmd),
            OrderCommand::FinalizeOrder(cmd) => self.handle_finalize(cmd),
            OrderCommand::MarkFinalized(cmd) => self.handle_mark_finalized(cmd),
        }
    }
}

impl Order {
    fn ensure_open(&self) -> Result<(), DomainError> {
        if self.is_finalized() {
            return Err(DomainError::order_state("Order already finalized"));
        }
        Ok(())
    }

    fn ensure_order_id(&self, order_id: OrderId) -> Result<(), DomainError> {
        if self.id != order_id {
            return Err(DomainError::validation("order_id mismatch"));
        }
        Ok(())
    }

    fn handle_add_line(&self, cmd: &AddLine) -> Result<Vec<OrderEvent>, DomainError> {
        self.ensure_order_id(cmd.order_id)?;
        self.ensure_open()?;

        if cmd.quantity <= 0 {
            return Err(DomainError::validation("Quantity must be greater than zero"));
        }

        Ok(vec![OrderEvent::LineAdded(LineAdded {
            order_id: cmd.order_id,
            item_id: cmd.item_id,
            quantity: cmd.quantity,
        })])
    }

    fn handle_reduce_line(&self, cmd: &ReduceLine) -> Result<Vec<OrderEvent>, DomainError> {
        self.ensure_order_id(cmd.order_id)?;
        self.ensure_open()?;

        let Some(line) = self.lines.iter().find(|l| l.item_id == cmd.item_id) else {
            return Ok(vec![]);
        };

        if cmd.quantity <= 0 {
            return Err(DomainError::validation("Quantity must be greater than zero"));
        }

        Ok(vec![OrderEvent::LineReduced(LineReduced {
            order_id: cmd.order_id,
            item_id: cmd.item_id,
            released: cmd.quantity.min(line.quantity),
        })])
    }

    fn handle_finalize(&self, cmd: &FinalizeOrder) -> Result<Vec<OrderEvent>, DomainError> {
        self.ensure_order_id(cmd.order_id)?;

        if self.lines.is_empty() {
            return Err(DomainError::order_content(
                "Order with no products cannot be finalized",
            ));
        }

        if self.is_finalized() {
            return Ok(vec![]);
        }

        Ok(vec![OrderEvent::OrderFinalized(OrderFinalized {
            order_id: cmd.order_id,
        })])
    }

    fn handle_mark_finalized(&self, cmd: &MarkFinalized) -> Result<Vec<OrderEvent>, DomainError> {
        self.ensure_order_id(cmd.order_id)?;

        if self.is_finalized() {
            return Ok(vec![]);
        }

        Ok(vec![OrderEvent::OrderFinalized(OrderFinalized {
            order_id: cmd.order_id,
        })])
    }
}
