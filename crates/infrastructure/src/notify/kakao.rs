use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use korres_core::traits::{
    ChatAuthGateway, NotificationMessage, Notifier, StateStore, KAKAO_AUTH_KEY,
};
use korres_core::{KorresError, KorresResult};

const KAUTH_TOKEN_URL: &str = "https://kauth.kakao.com/oauth/token";
const KAPI_MEMO_URL: &str = "https://kapi.kakao.com/v2/api/talk/memo/default/send";

/// KakaoTalk 访问令牌，授权码换取后整体持久化
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KakaoToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// KakaoTalk "나에게 보내기" 推送渠道
///
/// 同时承担授权回调的令牌交换：code 换 token 后写入状态存储，
/// 并推送一条登录完成消息。
pub struct KakaoNotifier {
    http: reqwest::Client,
    store: Arc<dyn StateStore>,
    client_id: String,
    redirect_uri: String,
}

impl KakaoNotifier {
    pub fn new(
        store: Arc<dyn StateStore>,
        client_id: String,
        redirect_uri: String,
    ) -> KorresResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| KorresError::network(e.to_string()))?;

        Ok(Self {
            http,
            store,
            client_id,
            redirect_uri,
        })
    }

    /// 推送消息的 template_object 报文
    fn build_template(text: &str) -> String {
        serde_json::json!({
            "object_type": "text",
            "text": text,
            "link": {
                "web_url": "https://developers.kakao.com",
                "mobile_web_url": "https://developers.kakao.com"
            },
            "button_title": "바로 확인"
        })
        .to_string()
    }

    async fn access_token(&self) -> KorresResult<Option<KakaoToken>> {
        let Some(value) = self.store.get(KAKAO_AUTH_KEY).await? else {
            return Ok(None);
        };
        let token: KakaoToken = serde_json::from_value(value)?;
        Ok(Some(token))
    }

    /// 向本人发送一条文本消息
    pub async fn push(&self, text: &str) -> KorresResult<()> {
        let Some(token) = self.access_token().await? else {
            return Err(KorresError::Notification(
                "缺少KakaoTalk访问令牌，尚未完成授权".to_string(),
            ));
        };

        let form = [("template_object", Self::build_template(text))];
        self.http
            .post(KAPI_MEMO_URL)
            .bearer_auth(&token.access_token)
            .form(&form)
            .send()
            .await
            .map_err(|e| KorresError::network(e.to_string()))?
            .error_for_status()
            .map_err(|e| KorresError::Notification(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl Notifier for KakaoNotifier {
    fn name(&self) -> &str {
        "kakao"
    }

    async fn notify(&self, message: &NotificationMessage) -> KorresResult<()> {
        // 预订成功的推送附带支付提醒文案
        self.push(&format!("{} 15분 내로 결제 진행해 주세요.", message.title))
            .await
    }
}

#[async_trait]
impl ChatAuthGateway for KakaoNotifier {
    async fn exchange_code(&self, code: &str) -> KorresResult<()> {
        let form = [
            ("grant_type", "authorization_code".to_string()),
            ("client_id", self.client_id.clone()),
            ("redirect_uri", self.redirect_uri.clone()),
            ("code", code.to_string()),
        ];

        let token: KakaoToken = self
            .http
            .post(KAUTH_TOKEN_URL)
            .form(&form)
            .send()
            .await
            .map_err(|e| KorresError::network(e.to_string()))?
            .error_for_status()
            .map_err(|e| KorresError::Notification(format!("令牌交换被拒绝: {e}")))?
            .json()
            .await
            .map_err(|e| KorresError::Notification(format!("解析令牌响应失败: {e}")))?;

        self.store
            .put(KAKAO_AUTH_KEY, serde_json::to_value(&token)?)
            .await?;
        info!("KakaoTalk访问令牌已保存");

        // 登录完成的推送尽力而为，失败不影响令牌保存
        if let Err(e) = self.push("로그인 완료").await {
            warn!("登录完成推送失败: {}", e);
        }
        Ok(())
    }
}
