// tests/api/envelope_tests.rs

#[cfg(test)]
mod tests {

    use crate::fixtures::server::{TestServer, user_body};
    use serde_json::{Value, json};

    #[tokio::test]
    async fn success_envelope_has_no_error_fields() {
        let server = TestServer::unlimited().await;

        let body = server.create_user("john@example.com", "+1234567890").await;

        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "User created successfully");
        assert_eq!(body["data"]["name"], "John");
        let object = body.as_object().unwrap();
        assert!(!object.contains_key("errorCode"));
        assert!(!object.contains_key("statusCode"));
        assert!(!object.contains_key("path"));
    }

    #[tokio::test]
    async fn duplicate_email_is_a_business_conflict() {
        let server = TestServer::unlimited().await;
        server.create_user("dup@example.com", "+1000001").await;

        let response = server
            .post_json("/api/user", &user_body("dup@example.com", "+1000002"))
            .await;
        assert_eq!(response.status().as_u16(), 409);

        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!({
                "success": false,
                "message": "Email already taken",
                "errorCode": "USER_EXIST_EMAIL",
                "statusCode": 409,
                "path": "/api/user"
            })
        );
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let server = TestServer::unlimited().await;
        let id = "7d9f3c1e-2b4a-4c8e-9f10-1a2b3c4d5e6f";

        let response = server.get(&format!("/api/user/{id}")).await;
        assert_eq!(response.status().as_u16(), 404);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["errorCode"], "USER_NOT_FOUND");
        assert_eq!(body["statusCode"], 404);
        assert_eq!(body["message"], format!("User not found with id: {id}"));
        assert_eq!(body["path"], format!("/api/user/{id}"));
    }

    #[tokio::test]
    async fn duplicate_phone_is_a_sanitized_database_conflict() {
        let server = TestServer::unlimited().await;
        server.create_user("a@example.com", "+1000001").await;

        let response = server
            .post_json("/api/user", &user_body("b@example.com", "+1000001"))
            .await;
        assert_eq!(response.status().as_u16(), 409);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["errorCode"], "DATABASE");
        assert_eq!(
            body["message"],
            "Detail: Key (phone_number)=(+1000001) already exists."
        );
    }

    #[tokio::test]
    async fn field_errors_ride_in_the_payload() {
        let server = TestServer::unlimited().await;

        let response = server
            .post_json("/api/user", &json!({"name": "John", "email": "nope"}))
            .await;
        assert_eq!(response.status().as_u16(), 400);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["errorCode"], "VALIDATION");
        assert_eq!(body["message"], "Validation error occurred");
        let errors: Vec<String> = serde_json::from_value(body["data"].clone()).unwrap();
        assert!(errors.contains(&"surname: Surname cannot be blank".to_string()));
        assert!(errors.contains(&"email: must be a well-formed email address".to_string()));
        assert!(errors.contains(&"dateOfBirth: Date of Birth cannot be null".to_string()));
    }

    #[tokio::test]
    async fn malformed_input_is_a_validation_failure() {
        let server = TestServer::unlimited().await;

        let response = server
            .client
            .post(server.url("/api/user"))
            .header("content-type", "application/json")
            .body("{not json")
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["errorCode"], "VALIDATION");

        let response = server.get("/api/user/not-a-uuid").await;
        assert_eq!(response.status().as_u16(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["data"], json!(["userId: must be a valid UUID"]));

        let response = server.get("/api/user?size=0").await;
        assert_eq!(response.status().as_u16(), 400);

        let response = server.get("/api/user?page=minus-one").await;
        assert_eq!(response.status().as_u16(), 400);
    }

    #[tokio::test]
    async fn unknown_route_is_enveloped() {
        let server = TestServer::unlimited().await;

        let response = server.get("/api/nope").await;
        assert_eq!(response.status().as_u16(), 404);

        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!({
                "success": false,
                "message": "No endpoint GET /api/nope",
                "errorCode": "ROUTE_NOT_FOUND",
                "statusCode": 404,
                "path": "/api/nope"
            })
        );
    }

    #[tokio::test]
    async fn unsupported_method_is_enveloped() {
        let server = TestServer::unlimited().await;

        let response = server
            .client
            .patch(server.url("/api/user"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 404);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["errorCode"], "ROUTE_NOT_FOUND");
        assert_eq!(body["message"], "No endpoint PATCH /api/user");
        assert_eq!(body["path"], "/api/user");
    }
}
