use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Upper bound of every percentage the ledger reports
pub const PERCENT_MAX: Decimal = dec!(100);

/// Decimal precision for money values derived from percentages
pub const MONEY_DECIMAL_PRECISION: u32 = 2;

/// Largest amount accepted on a single record or freight figure.
/// Keeps every sum over a load far below `Decimal::MAX`.
pub const MAX_RECORD_AMOUNT: Decimal = dec!(1000000000000);
