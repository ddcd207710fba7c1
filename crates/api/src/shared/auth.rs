use crate::error::AvtaleError;
use actix_web::HttpRequest;
use avtale_api_structs::send_booking_reminders::QueryParams;
use avtale_infra::AvtaleContext;

/// The reminder trigger authenticates with a shared secret, taken from the
/// `authorization` header or the `apiKey` query parameter. The header wins
/// when both are present.
pub fn protect_cron_route(
    http_req: &HttpRequest,
    query_params: &QueryParams,
    ctx: &AvtaleContext,
) -> Result<(), AvtaleError> {
    let header_key = http_req
        .headers()
        .get("authorization")
        .and_then(|value| value.to_str().ok());
    let api_key = header_key.or(query_params.api_key.as_deref());

    match api_key {
        Some(api_key) if api_key == ctx.config.cron_api_key => Ok(()),
        _ => Err(AvtaleError::NotAuthenticated),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn setup() -> AvtaleContext {
        AvtaleContext::create_inmemory()
    }

    fn query(api_key: Option<&str>) -> QueryParams {
        QueryParams {
            api_key: api_key.map(String::from),
        }
    }

    #[test]
    fn accepts_the_secret_from_the_authorization_header() {
        let ctx = setup();
        let req = TestRequest::post()
            .insert_header(("authorization", ctx.config.cron_api_key.clone()))
            .to_http_request();
        assert!(protect_cron_route(&req, &query(None), &ctx).is_ok());
    }

    #[test]
    fn accepts_the_secret_from_the_query_parameter() {
        let ctx = setup();
        let req = TestRequest::post().to_http_request();
        let query = query(Some(&ctx.config.cron_api_key));
        assert!(protect_cron_route(&req, &query, &ctx).is_ok());
    }

    #[test]
    fn rejects_a_wrong_secret() {
        let ctx = setup();
        let req = TestRequest::post()
            .insert_header(("authorization", "wrong-secret"))
            .to_http_request();
        assert!(matches!(
            protect_cron_route(&req, &query(None), &ctx),
            Err(AvtaleError::NotAuthenticated)
        ));
    }

    #[test]
    fn rejects_a_missing_secret() {
        let ctx = setup();
        let req = TestRequest::post().to_http_request();
        assert!(matches!(
            protect_cron_route(&req, &query(None), &ctx),
            Err(AvtaleError::NotAuthenticated)
        ));
    }
}
