// Domain 層：單次請求的模型與 SMS 閘道介面

pub mod model;
pub mod ports;
