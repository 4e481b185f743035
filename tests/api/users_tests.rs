// tests/api/users_tests.rs

#[cfg(test)]
mod tests {

    use crate::fixtures::server::{TestServer, user_body};
    use serde_json::{Value, json};

    #[tokio::test]
    async fn get_user_by_id() {
        let server = TestServer::unlimited().await;
        let created = server.create_user("john@example.com", "+1234567890").await;
        let id = created["data"]["id"].as_str().unwrap();

        let response = server.get(&format!("/api/user/{id}")).await;
        assert_eq!(response.status().as_u16(), 200);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "User retrieved successfully");
        assert_eq!(body["data"]["email"], "john@example.com");
        assert_eq!(body["data"]["userRole"], "ROLE_USER");
        assert!(body["data"].get("password").is_none());
    }

    #[tokio::test]
    async fn list_filters_and_pages() {
        let server = TestServer::unlimited().await;
        for i in 0..3 {
            server
                .create_user(&format!("u{i}@example.com"), &format!("+100000{i}"))
                .await;
        }

        let body: Value = server.get("/api/user?size=2").await.json().await.unwrap();
        assert_eq!(body["message"], "All users retrieved successfully");
        assert_eq!(body["data"]["content"].as_array().unwrap().len(), 2);
        assert_eq!(body["data"]["totalElements"], 3);
        assert_eq!(body["data"]["totalPages"], 2);

        let body: Value = server
            .get("/api/user?email=u1@example.com")
            .await
            .json()
            .await
            .unwrap();
        assert_eq!(body["data"]["totalElements"], 1);

        let response = server.get("/api/user?name=nobody").await;
        assert_eq!(response.status().as_u16(), 404);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "No users found in database");
    }

    #[tokio::test]
    async fn update_user() {
        let server = TestServer::unlimited().await;
        let created = server.create_user("john@example.com", "+1000001").await;
        let id = created["data"]["id"].as_str().unwrap();

        let mut body = user_body("jane@example.com", "+1000002");
        body["name"] = json!("Jane");
        let response = server.put_json(&format!("/api/user/{id}"), &body).await;
        assert_eq!(response.status().as_u16(), 200);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["message"], "User updated successfully");
        assert_eq!(body["data"]["name"], "Jane");
        assert_eq!(body["data"]["email"], "jane@example.com");
    }

    #[tokio::test]
    async fn delete_user_then_it_is_gone() {
        let server = TestServer::unlimited().await;
        let created = server.create_user("john@example.com", "+1000001").await;
        let id = created["data"]["id"].as_str().unwrap();

        let response = server.delete(&format!("/api/user/{id}")).await;
        assert_eq!(response.status().as_u16(), 200);
        let body: Value = response.json().await.unwrap();
        assert_eq!(
            body,
            json!({"success": true, "message": "User deleted successfully"})
        );

        let response = server.delete(&format!("/api/user/{id}")).await;
        assert_eq!(response.status().as_u16(), 404);
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let server = TestServer::unlimited().await;
        let body: Value = server.get("/health").await.json().await.unwrap();
        assert_eq!(body["status"], "healthy");
        assert!(body["timestamp"].is_string());
    }
}
