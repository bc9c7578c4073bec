pub mod inspect_cmd;
pub mod scan_cmd;
pub mod solve_cmd;

pub use inspect_cmd::cmd_inspect;
pub use scan_cmd::cmd_scan;
pub use solve_cmd::cmd_solve;
