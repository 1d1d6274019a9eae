use serde::{Deserialize, Serialize};

use storefront_core::{Aggregate, AggregateId, AggregateRoot, DomainError, DomainResult};
use storefront_events::Event;

use crate::pricing::Discount;

const MIN_NAME_LEN: usize = 3;

/// Catalog item identifier; the handle orders use to refer to an item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub AggregateId);

impl ItemId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }

    /// Fresh, time-ordered identifier.
    pub fn generate() -> Self {
        Self(AggregateId::new())
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Aggregate root: Item.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    name: String,
    original_price: f64,
    current_price: f64,
    discount: Option<Discount>,
    stock: i64,
    version: u64,
    created: bool,
}

impl Item {
    /// Create an empty, not-yet-created aggregate instance.
    pub fn empty(id: ItemId) -> Self {
        Self {
            id,
            name: String::new(),
            original_price: 0.0,
            current_price: 0.0,
            discount: None,
            stock: 0,
            version: 0,
            created: false,
        }
    }

    /// Validate `cmd` and build the item it describes.
    pub fn create(cmd: CreateItem) -> DomainResult<Self> {
        let mut item = Self::empty(cmd.item_id);
        item.execute(&ItemCommand::CreateItem(cmd))?;
        Ok(item)
    }

    /// Shorthand for [`Item::create`] with a generated id and every field present.
    pub fn new(
        name: impl Into<String>,
        original_price: f64,
        stock: i64,
        discount: Option<f64>,
    ) -> DomainResult<Self> {
        Self::create(CreateItem {
            item_id: ItemId::generate(),
            name: name.into(),
            original_price: Some(original_price),
            stock: Some(stock),
            discount,
        })
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn original_price(&self) -> f64 {
        self.original_price
    }

    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    pub fn discount(&self) -> Option<Discount> {
        self.discount
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    /// Replace the discount and reprice from the original price.
    pub fn set_discount(&mut self, discount: f64) -> DomainResult<()> {
        let cmd = ItemCommand::ChangeDiscount(ChangeDiscount {
            item_id: self.id,
            discount,
        });
        self.execute(&cmd).map(|_| ())
    }

    pub fn reduce_stock(&mut self, quantity: i64) -> DomainResult<()> {
        let cmd = ItemCommand::ReduceStock(ReduceStock {
            item_id: self.id,
            quantity,
        });
        self.execute(&cmd).map(|_| ())
    }

    pub fn increase_stock(&mut self, quantity: i64) -> DomainResult<()> {
        let cmd = ItemCommand::IncreaseStock(IncreaseStock {
            item_id: self.id,
            quantity,
        });
        self.execute(&cmd).map(|_| ())
    }

    /// One-line description: name and current price, plus the discount and the
    /// original price when a discount is active.
    pub fn describe(&self) -> String {
        let base = format!("Item: {}, Price: {:.2}", self.name, self.current_price);
        match self.discount {
            Some(discount) => format!(
                "{base}, Discount: {}, Original Price: {:.2}",
                discount.label(),
                self.original_price
            ),
            None => base,
        }
    }

    fn reprice(&mut self) {
        self.current_price = match self.discount {
            Some(discount) => discount.apply(self.original_price),
            None => self.original_price,
        };
    }
}

impl core::fmt::Display for Item {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.describe())
    }
}

impl AggregateRoot for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateItem.
///
/// Optional fields model inputs that may be absent at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateItem {
    pub item_id: ItemId,
    pub name: String,
    pub original_price: Option<f64>,
    pub stock: Option<i64>,
    pub discount: Option<f64>,
}

/// Command: ReduceStock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReduceStock {
    pub item_id: ItemId,
    pub quantity: i64,
}

/// Command: IncreaseStock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncreaseStock {
    pub item_id: ItemId,
    pub quantity: i64,
}

/// Command: ChangeDiscount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeDiscount {
    pub item_id: ItemId,
    pub discount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemCommand {
    CreateItem(CreateItem),
    ReduceStock(ReduceStock),
    IncreaseStock(IncreaseStock),
    ChangeDiscount(ChangeDiscount),
}

/// Event: ItemCreated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCreated {
    pub item_id: ItemId,
    pub name: String,
    pub original_price: f64,
    pub stock: i64,
    pub discount: Option<Discount>,
}

/// Event: StockReduced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReduced {
    pub item_id: ItemId,
    pub quantity: i64,
}

/// Event: StockIncreased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockIncreased {
    pub item_id: ItemId,
    pub quantity: i64,
}

/// Event: DiscountChanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountChanged {
    pub item_id: ItemId,
    pub discount: Discount,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemEvent {
    ItemCreated(ItemCreated),
    StockReduced(StockReduced),
    StockIncreased(StockIncreased),
    DiscountChanged(DiscountChanged),
}

impl Event for ItemEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ItemEvent::ItemCreated(_) => "inventory.item.created",
            ItemEvent::StockReduced(_) => "inventory.item.stock_reduced",
            ItemEvent::StockIncreased(_) => "inventory.item.stock_increased",
            ItemEvent::DiscountChanged(_) => "inventory.item.discount_changed",
        }
    }
}

impl Aggregate for Item {
    type Command = ItemCommand;
    type Event = ItemEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ItemEvent::ItemCreated(e) => {
                self.id = e.item_id;
                self.name = e.name.clone();
                self.original_price = e.original_price;
                self.stock = e.stock;
                self.discount = e.discount;
                self.reprice();
                self.created = true;
            }
            ItemEvent::StockReduced(e) => {
                self.stock -= e.quantity;
            }
            ItemEvent::StockIncreased(e) => {
                self.stock += e.quantity;
            }
            ItemEvent::DiscountChanged(e) => {
                self.discount = Some(e.discount);
                self.reprice();
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ItemCommand::CreateItem(cmd) => self.handle_create(cmd),
            ItemCommand::ReduceStock(cmd) => self.handle_reduce(cmd),
            ItemCommand::IncreaseStock(cmd) => self.handle_increase(cmd),
            ItemCommand::ChangeDiscount(cmd) => self.handle_change_discount(cmd),
        }
    }
}

impl Item {
    fn ensure_created(&self) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found(format!("Item {}", self.id)));
        }
        Ok(())
    }

    fn ensure_item_id(&self, item_id: ItemId) -> Result<(), DomainError> {
        if self.id != item_id {
            return Err(DomainError::validation("item_id mismatch"));
        }
        Ok(())
    }

    fn ensure_positive_quantity(quantity: i64) -> Result<(), DomainError> {
        if quantity <= 0 {
            return Err(DomainError::validation("Quantity must be greater than zero"));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateItem) -> Result<Vec<ItemEvent>, DomainError> {
        if self.created {
            return Err(DomainError::validation("Item already exists"));
        }
        self.ensure_item_id(cmd.item_id)?;

        if cmd.name.is_empty() {
            return Err(DomainError::validation("Name must not be empty"));
        }
        if cmd.name.chars().count() < MIN_NAME_LEN {
            return Err(DomainError::validation("Name must be at least 3 characters"));
        }

        let original_price = match cmd.original_price {
            Some(p) if !p.is_nan() => p,
            _ => return Err(DomainError::validation("Price must not be empty")),
        };
        if original_price <= 0.0 {
            return Err(DomainError::validation("Price must be positive"));
        }

        let stock = cmd
            .stock
            .ok_or_else(|| DomainError::validation("Stock must not be empty"))?;
        if stock <= 0 {
            return Err(DomainError::validation("Stock must be positive"));
        }

        let discount = cmd.discount.map(Discount::new).transpose()?;

        Ok(vec![ItemEvent::ItemCreated(ItemCreated {
            item_id: cmd.item_id,
            name: cmd.name.clone(),
            original_price,
            stock,
            discount,
        })])
    }

    fn handle_reduce(&self, cmd: &ReduceStock) -> Result<Vec<ItemEvent>, DomainError> {
        self.ensure_created()?;
        self.ensure_item_id(cmd.item_id)?;
        Self::ensure_positive_quantity(cmd.quantity)?;

        if cmd.quantity > self.stock {
            return Err(DomainError::stock("Insufficient stock"));
        }

        Ok(vec![ItemEvent::StockReduced(StockReduced {
            item_id: cmd.item_id,
            quantity: cmd.quantity,
        })])
    }

    fn handle_increase(&self, cmd: &IncreaseStock) -> Result<Vec<ItemEvent>, DomainError> {
        self.ensure_created()?;
        self.ensure_item_id(cmd.item_id)?;
        Self::ensure_positive_quantity(cmd.quantity)?;

        if self.stock.checked_add(cmd.quantity).is_none() {
            return Err(DomainError::stock("Stock limit exceeded"));
        }

        Ok(vec![ItemEvent::StockIncreased(StockIncreased {
            item_id: cmd.item_id,
            quantity: cmd.quantity,
        })])
    }

    fn handle_change_discount(
        &self,
        cmd: &ChangeDiscount,
    ) -> Result<Vec<ItemEvent>, DomainError> {
        self.ensure_created()?;
        self.ensure_item_id(cmd.item_id)?;

        let discount = Discount::new(cmd.discount)?;

        Ok(vec![ItemEvent::DiscountChanged(DiscountChanged {
            item_id: cmd.item_id,
            discount,
        })])
    }
}
