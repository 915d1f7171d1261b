use serde::{Deserialize, Serialize};

/// 登录成功后的用户信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "strCustNm")]
    pub name: String,
    #[serde(rename = "strMbCrdNo", default)]
    pub membership_number: String,
    #[serde(rename = "strEmailAdr", default)]
    pub email: String,
}
