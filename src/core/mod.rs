//! # Core Menu Logic
//!
//! Everything that decides what a menu does. It knows nothing about the
//! real terminal; all I/O goes through [`crate::term::Console`].
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Menu (state machine) │
//!                    │  • Entry (label+action) │
//!                    │  • Action (dispatch)    │
//!                    │  • Operation (callee)   │
//!                    └───────────┬─────────────┘
//!                                │ Console
//!                    ┌───────────┴───────────┐
//!                    ▼                       ▼
//!             ┌─────────────┐         ┌─────────────┐
//!             │ StdConsole  │         │  Scripted   │
//!             │ (crossterm) │         │  Console    │
//!             └─────────────┘         └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`menu`]: `Menu`, its `Behavior` switches and `MenuError`
//! - [`entry`]: `Entry`, one labelled line of a menu
//! - [`action`]: `Action`, triggers + prompts + bound operation
//! - [`operation`]: the `Operation` trait and its `Args`
//! - [`config`]: TOML/env/CLI resolution of a menu's `Behavior`

pub mod action;
pub mod config;
pub mod entry;
pub mod menu;
pub mod operation;
