mod catalog;
mod chart;
mod data;
mod helpers;
mod history;
mod log;

pub(crate) use catalog::cmd_catalog;
pub(crate) use chart::cmd_chart;
pub(crate) use data::{cmd_clear, cmd_export, cmd_import};
pub(crate) use history::cmd_history;
pub(crate) use log::{EditArgs, cmd_delete, cmd_log, cmd_show};
