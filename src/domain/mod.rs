// Domain layer: models handed over by the order-management system plus the
// transport port to the external tax service.

pub mod model;
pub mod ports;
