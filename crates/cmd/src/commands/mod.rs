// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

pub mod get;
pub mod list;
pub mod mkdir;
pub mod mv;
pub mod put;
pub mod rm;

pub use get::get_command;
pub use list::{list_command, search_command};
pub use mkdir::mkdir_command;
pub use mv::mv_command;
pub use put::put_command;
pub use rm::rm_command;
