// tests/api/rate_limit_tests.rs

#[cfg(test)]
mod tests {

    use crate::fixtures::server::TestServer;
    use user_service::config::RateLimitConfig;

    #[tokio::test]
    async fn burst_is_cut_off_then_window_resets() {
        let server = TestServer::start(RateLimitConfig::new(5, 1000)).await;

        // 5 requests inside the first 500 ms are admitted
        for step in 0..5 {
            server.clock.set(step * 100);
            let response = server.get("/api/user").await;
            assert_ne!(response.status().as_u16(), 429, "request {} rejected", step + 1);
        }

        // the 6th at 600 ms is shed with the plain-text body
        server.clock.set(600);
        let response = server.get("/api/user").await;
        assert_eq!(response.status().as_u16(), 429);
        assert_eq!(response.text().await.unwrap(), "So many requests per second.");

        // after the window expires the client is admitted again
        server.clock.set(1600);
        let response = server.get("/api/user").await;
        assert_ne!(response.status().as_u16(), 429);
    }

    #[tokio::test]
    async fn rejection_bypasses_the_handler() {
        let server = TestServer::start(RateLimitConfig::new(1, 1000)).await;

        server.create_user("first@example.com", "+1000001").await;

        let response = server
            .post_json(
                "/api/user",
                &crate::fixtures::server::user_body("second@example.com", "+1000002"),
            )
            .await;
        assert_eq!(response.status().as_u16(), 429);

        // nothing was created by the rejected request
        server.clock.set(5000);
        let page: serde_json::Value = server.get("/api/user").await.json().await.unwrap();
        assert_eq!(page["data"]["totalElements"], 1);
    }

    #[tokio::test]
    async fn paths_outside_the_prefix_are_not_limited() {
        let server = TestServer::start(RateLimitConfig::new(1, 1000)).await;

        assert_ne!(server.get("/api/user").await.status().as_u16(), 429);
        assert_eq!(server.get("/api/user").await.status().as_u16(), 429);

        for _ in 0..5 {
            assert_eq!(server.get("/health").await.status().as_u16(), 200);
        }
        assert_eq!(server.get("/metrics").await.status().as_u16(), 200);
    }

    #[tokio::test]
    async fn unknown_routes_under_the_prefix_are_limited_too() {
        let server = TestServer::start(RateLimitConfig::new(1, 1000)).await;

        let response = server.get("/api/nope").await;
        assert_eq!(response.status().as_u16(), 404);
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["errorCode"], "ROUTE_NOT_FOUND");

        let response = server.get("/api/nope").await;
        assert_eq!(response.status().as_u16(), 429);
    }

    #[tokio::test]
    async fn metrics_report_tracked_clients() {
        let server = TestServer::unlimited().await;

        server.get("/api/user").await;

        let body = server.get("/metrics").await.text().await.unwrap();
        assert!(
            body.lines().any(|line| line == "user_service_tracked_clients 1"),
            "gauge missing from scrape:\n{body}"
        );
    }
}
