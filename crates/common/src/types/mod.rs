use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Landing payload served at `/`.
#[derive(Serialize, Debug)]
pub struct Banner {
    pub service: &'static str,
    pub version: &'static str,
    pub routes: &'static [&'static str],
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Clock {
    pub time: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArithmeticResult {
    pub result: i64,
}
