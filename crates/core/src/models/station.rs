use serde::{Deserialize, Serialize};

/// 车站信息，来自车站目录接口
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    #[serde(rename = "stn_nm")]
    pub name: String,
    #[serde(rename = "stn_cd", default)]
    pub code: String,
}
