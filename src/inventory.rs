//! # Inventory Demo
//!
//! A small in-memory inventory driven by a looping menu. This is what the
//! `textmenu` binary runs, and a worked example of wiring typed operations
//! into entries.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use log::info;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::core::action::Action;
use crate::core::entry::Entry;
use crate::core::menu::{Behavior, Menu};
use crate::core::operation::{Args, OperationError};

pub const ITEM_EXISTS: &str = "The item already exists";
pub const ITEM_MISSING: &str = "The item does not exist";
pub const EMPTY_INVENTORY: &str = "The inventory is empty";

/// Name → item map shared by all of the menu's operations.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    items: Rc<RefCell<BTreeMap<String, String>>>,
}

#[derive(Deserialize)]
struct NameArgs {
    name: String,
}

#[derive(Deserialize)]
struct AddArgs {
    name: String,
    item: String,
}

#[derive(Deserialize)]
struct ModifyArgs {
    name: String,
    new_item: String,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn add(&self, args: Args) -> Result<Value, OperationError> {
        let AddArgs { name, item } = args.deserialize()?;
        let mut items = self.items.borrow_mut();
        if items.contains_key(&name) {
            return Err(OperationError::new(ITEM_EXISTS));
        }
        info!("Adding '{name}'");
        items.insert(name, item);
        Ok(Value::Null)
    }

    pub fn remove(&self, args: Args) -> Result<Value, OperationError> {
        let NameArgs { name } = args.deserialize()?;
        match self.items.borrow_mut().remove(&name) {
            Some(_) => {
                info!("Removed '{name}'");
                Ok(Value::Null)
            }
            None => Err(OperationError::new(ITEM_MISSING)),
        }
    }

    pub fn modify(&self, args: Args) -> Result<Value, OperationError> {
        let ModifyArgs { name, new_item } = args.deserialize()?;
        match self.items.borrow_mut().get_mut(&name) {
            Some(item) => {
                *item = new_item;
                Ok(Value::Null)
            }
            None => Err(OperationError::new(ITEM_MISSING)),
        }
    }

    pub fn get(&self, args: Args) -> Result<Value, OperationError> {
        let NameArgs { name } = args.deserialize()?;
        self.items
            .borrow()
            .get(&name)
            .map(|item| json!(item))
            .ok_or_else(|| OperationError::new(ITEM_MISSING))
    }

    /// One `name: item` line per entry, sorted by name.
    pub fn list(&self, _args: Args) -> Result<Value, OperationError> {
        let items = self.items.borrow();
        if items.is_empty() {
            return Ok(json!(EMPTY_INVENTORY));
        }
        let lines: Vec<String> = items
            .iter()
            .map(|(name, item)| format!("{name}: {item}"))
            .collect();
        Ok(json!(lines.join("\n")))
    }

    /// Builds the interactive inventory menu. Exit is `5`.
    pub fn menu(&self, behavior: Behavior) -> Menu {
        let add = self.clone();
        let remove = self.clone();
        let modify = self.clone();
        let get = self.clone();
        let list = self.clone();

        Menu::new(["Welcome to the inventory", "What can I do for you today?"])
            .expects_input(true)
            .behavior(behavior)
            .entry(Entry::new(
                "1) Add item",
                Action::new(["1"])
                    .operation(move |args: Args| add.add(args))
                    .prompt("name", "Enter the item name")
                    .prompt("item", "Enter the item"),
            ))
            .entry(Entry::new(
                "2) Remove item",
                Action::new(["2"])
                    .operation(move |args: Args| remove.remove(args))
                    .prompt("name", "Enter the item name"),
            ))
            .entry(Entry::new(
                "3) Modify item",
                Action::new(["3"])
                    .operation(move |args: Args| modify.modify(args))
                    .prompt("name", "Enter the item name")
                    .prompt("new_item", "Enter the new item"),
            ))
            .entry(Entry::new(
                "4) Get item",
                Action::new(["4"])
                    .operation(move |args: Args| get.get(args))
                    .prompt("name", "Enter the item name")
                    .print_result(true),
            ))
            .entry(Entry::new(
                "l) List items",
                Action::new(["l", "L"])
                    .operation(move |args: Args| list.list(args))
                    .print_result(true),
            ))
            .exit(Entry::new("5) Exit", Action::new(["5"])))
    }
}
