use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Domain entities that carry a changelog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "change_log_entity_type", rename_all = "PascalCase")]
pub enum ChangeLogEntityType {
    Task,
    Customer,
    Supplier,
    Order,
    Item,
    Borrow,
    Paint,
    PaintFormula,
    User,
    Truck,
    Airbrushing,
    Cut,
}

impl From<ChangeLogEntityType> for &str {
    fn from(val: ChangeLogEntityType) -> Self {
        match val {
            ChangeLogEntityType::Task => "Task",
            ChangeLogEntityType::Customer => "Customer",
            ChangeLogEntityType::Supplier => "Supplier",
            ChangeLogEntityType::Order => "Order",
            ChangeLogEntityType::Item => "Item",
            ChangeLogEntityType::Borrow => "Borrow",
            ChangeLogEntityType::Paint => "Paint",
            ChangeLogEntityType::PaintFormula => "PaintFormula",
            ChangeLogEntityType::User => "User",
            ChangeLogEntityType::Truck => "Truck",
            ChangeLogEntityType::Airbrushing => "Airbrushing",
            ChangeLogEntityType::Cut => "Cut",
        }
    }
}

impl std::fmt::Display for ChangeLogEntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s: &str = (*self).into();
        write!(f, "{s}")
    }
}

impl FromStr for ChangeLogEntityType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Task" => Ok(ChangeLogEntityType::Task),
            "Customer" => Ok(ChangeLogEntityType::Customer),
            "Supplier" => Ok(ChangeLogEntityType::Supplier),
            "Order" => Ok(ChangeLogEntityType::Order),
            "Item" => Ok(ChangeLogEntityType::Item),
            "Borrow" => Ok(ChangeLogEntityType::Borrow),
            "Paint" => Ok(ChangeLogEntityType::Paint),
            "PaintFormula" => Ok(ChangeLogEntityType::PaintFormula),
            "User" => Ok(ChangeLogEntityType::User),
            "Truck" => Ok(ChangeLogEntityType::Truck),
            "Airbrushing" => Ok(ChangeLogEntityType::Airbrushing),
            "Cut" => Ok(ChangeLogEntityType::Cut),
            _ => Err(()),
        }
    }
}
