pub mod employee;
pub mod inventory_item;
pub mod repair_line_item;
pub mod repair_order;
pub mod report;
pub mod report_line;
pub mod user;
