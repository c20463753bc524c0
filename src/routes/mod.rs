pub mod calendar_routes;
pub mod dispatch_routes;
pub mod operation_routes;
pub mod schedule_block_routes;
