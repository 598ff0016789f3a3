mod tables;
mod charts;

pub use tables::{
    format_period_table, print_period_table,
    format_parameter_table, print_parameter_table,
};
pub use charts::{format_volume_chart, print_volume_chart};
