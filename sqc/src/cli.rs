use clap::{Parser, ValueEnum};
use gallery_query::DateOrder;
use std::path::PathBuf;

#[derive(Parser)]
pub struct Cli {
    /// JSON file with a localized keyword vocabulary.
    #[clap(long)]
    pub keywords: Option<PathBuf>,
    /// Juxtaposed terms stay unresolved instead of being OR-ed.
    #[clap(long, default_value = "false")]
    pub no_implicit_or: bool,
    #[clap(long, value_enum, default_value = "ymd")]
    pub date_order: DateOrderArg,
    /// Input lines are JSON query trees to render back into text.
    #[clap(long, default_value = "false")]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DateOrderArg {
    Ymd,
    Mdy,
    Dmy,
}

impl From<DateOrderArg> for DateOrder {
    fn from(arg: DateOrderArg) -> Self {
        match arg {
            DateOrderArg::Ymd => DateOrder::YearMonthDay,
            DateOrderArg::Mdy => DateOrder::MonthDayYear,
            DateOrderArg::Dmy => DateOrder::DayMonthYear,
        }
    }
}
