pub mod recurring_intervals;
