use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use korres_core::KorresError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("预约服务错误: {0}")]
    Korres(#[from] KorresError),

    #[error("请求参数错误: {0}")]
    BadRequest(String),

    #[error("内部服务器错误: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message, error_type, suggestions) = match &self {
            ApiError::Korres(KorresError::DuplicateTask { id }) => (
                StatusCode::CONFLICT,
                format!("车次 {} 已在队列中", id),
                "DUPLICATE_TASK".to_string(),
                vec![
                    "同一车次只允许一个预订任务，首个注册的任务继续生效".to_string(),
                    "使用 GET /api/tasks 查看当前队列".to_string(),
                ],
            ),
            ApiError::Korres(KorresError::TaskNotFound { id }) => (
                StatusCode::NOT_FOUND,
                format!("任务 {} 不存在", id),
                "TASK_NOT_FOUND".to_string(),
                vec![
                    "请检查任务ID是否正确".to_string(),
                    "使用 GET /api/tasks 查看当前队列".to_string(),
                ],
            ),
            ApiError::Korres(KorresError::ReservationNotFound { pnr }) => (
                StatusCode::NOT_FOUND,
                format!("预约记录 {} 不存在", pnr),
                "RESERVATION_NOT_FOUND".to_string(),
                vec!["使用 GET /api/reservations 查看当前预约".to_string()],
            ),
            ApiError::Korres(KorresError::Unauthenticated) => (
                StatusCode::UNAUTHORIZED,
                "未登录或会话已过期".to_string(),
                "UNAUTHENTICATED".to_string(),
                vec!["使用 POST /api/auth/login 重新登录".to_string()],
            ),
            ApiError::Korres(KorresError::LoginFailed(msg)) => (
                StatusCode::UNAUTHORIZED,
                format!("登录失败: {}", msg),
                "LOGIN_FAILED".to_string(),
                vec!["请检查会员号和密码".to_string()],
            ),
            ApiError::Korres(KorresError::Provider(msg)) => (
                StatusCode::BAD_GATEWAY,
                format!("预订服务接口错误: {}", msg),
                "PROVIDER_ERROR".to_string(),
                vec!["上游预订服务返回了错误，请稍后重试".to_string()],
            ),
            ApiError::Korres(KorresError::Network(msg)) => (
                StatusCode::BAD_GATEWAY,
                format!("网络错误: {}", msg),
                "NETWORK_ERROR".to_string(),
                vec!["请检查网络连接后重试".to_string()],
            ),
            ApiError::Korres(KorresError::Serialization(msg)) => (
                StatusCode::BAD_REQUEST,
                format!("数据格式错误: {}", msg),
                "SERIALIZATION_ERROR".to_string(),
                vec!["请检查请求数据格式".to_string()],
            ),
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                format!("请求参数错误: {}", msg),
                "BAD_REQUEST".to_string(),
                vec!["请检查请求格式和参数".to_string()],
            ),
            ApiError::Korres(KorresError::Configuration(msg)) => (
                StatusCode::BAD_REQUEST,
                format!("参数无效: {}", msg),
                "INVALID_PARAMS".to_string(),
                vec!["请检查请求参数取值".to_string()],
            ),
            ApiError::Korres(_) | ApiError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "系统内部错误".to_string(),
                "INTERNAL_ERROR".to_string(),
                vec![
                    "系统遇到内部错误，请稍后重试".to_string(),
                    "查看 GET /health 检查系统状态".to_string(),
                ],
            ),
        };

        let body = Json(json!({
            "error": {
                "message": error_message,
                "type": error_type,
                "code": status.as_u16(),
                "suggestions": suggestions,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_task_maps_to_conflict() {
        let error = ApiError::Korres(KorresError::duplicate_task("0051"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_task_not_found_maps_to_not_found() {
        let error = ApiError::Korres(KorresError::task_not_found("0051"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_login_failed_maps_to_unauthorized() {
        let error = ApiError::Korres(KorresError::LoginFailed("비밀번호 오류입니다".to_string()));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_provider_error_maps_to_bad_gateway() {
        let error = ApiError::Korres(KorresError::provider("upstream error"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let error = ApiError::Korres(KorresError::network("connection refused"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_storage_error_maps_to_internal() {
        let error = ApiError::Korres(KorresError::storage("disk full"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_bad_request_display() {
        let error = ApiError::BadRequest("date 格式应为 YYYYMMDD".to_string());
        let display = format!("{}", error);
        assert!(display.contains("请求参数错误"));
        assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
