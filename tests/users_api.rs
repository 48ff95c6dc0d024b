//! User endpoint tests.

use serde_json::json;

mod common;

#[tokio::test]
async fn test_create_user_returns_created_representation() {
    let server = common::spawn_server().await;

    let user = server.create_user("Ana", 30, "a@x.com").await;

    assert_eq!(user["name"], "Ana");
    assert_eq!(user["age"], 30);
    assert_eq!(user["email"], "a@x.com");
    assert_eq!(user["cars"], json!([]));
    assert_eq!(user["id"].as_str().unwrap().len(), 24);
}

#[tokio::test]
async fn test_create_user_missing_or_falsy_fields() {
    let server = common::spawn_server().await;

    let bodies = [
        json!({ "age": 30, "email": "a@x.com" }),
        json!({ "name": "Ana", "email": "a@x.com" }),
        json!({ "name": "Ana", "age": 30 }),
        json!({ "name": "", "age": 30, "email": "a@x.com" }),
        json!({ "name": "Ana", "age": 0, "email": "a@x.com" }),
        json!({ "name": "Ana", "age": "thirty", "email": "a@x.com" }),
        json!([]),
    ];

    for body in bodies {
        let res = server
            .client
            .post(server.url("/user"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 404, "body {body} should be rejected");
        assert_eq!(res.text().await.unwrap(), "Bad request");
    }

    let (_, users) = server.get_json("/users").await;
    assert_eq!(users, json!([]));
}

#[tokio::test]
async fn test_create_user_rejects_non_json_body() {
    let server = common::spawn_server().await;

    let res = server
        .client
        .post(server.url("/user"))
        .body("name=Ana")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_duplicate_email_conflicts_and_keeps_count() {
    let server = common::spawn_server().await;
    server.create_user("Ana", 30, "a@x.com").await;

    let res = server
        .client
        .post(server.url("/user"))
        .json(&json!({ "name": "Other", "age": 41, "email": "a@x.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 409);
    assert_eq!(res.text().await.unwrap(), "User already exist");

    let (status, users) = server.get_json("/users").await;
    assert_eq!(status, 200);
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["name"], "Ana");
}

#[tokio::test]
async fn test_list_users_by_exact_name() {
    let server = common::spawn_server().await;
    server.create_user("Ana", 30, "a@x.com").await;
    server.create_user("ana", 31, "b@x.com").await;
    server.create_user("Ana", 32, "c@x.com").await;

    let (status, anas) = server.get_json("/users?name=Ana").await;
    assert_eq!(status, 200);
    let emails: Vec<&str> = anas
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["email"].as_str().unwrap())
        .collect();
    assert_eq!(emails, vec!["a@x.com", "c@x.com"]);

    let (status, nobody) = server.get_json("/users?name=Zoe").await;
    assert_eq!(status, 200);
    assert_eq!(nobody, json!([]));

    let (_, everyone) = server.get_json("/users").await;
    assert_eq!(everyone.as_array().unwrap().len(), 3);

    // An empty name is the same as no name.
    let (_, everyone) = server.get_json("/users?name=").await;
    assert_eq!(everyone.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_get_user_by_email() {
    let server = common::spawn_server().await;
    let created = server.create_user("Ana", 30, "a@x.com").await;

    let (status, user) = server.get_json("/user?email=a@x.com").await;
    assert_eq!(status, 200);
    assert_eq!(user["id"], created["id"]);
    assert_eq!(user["name"], "Ana");
    assert_eq!(user["cars"], json!([]));

    let (status, text) = server.get_text("/user?email=b@x.com").await;
    assert_eq!(status, 404);
    assert_eq!(text, "User not found");

    let (status, _) = server.get_text("/user").await;
    assert_eq!(status, 400);

    let (status, _) = server.get_text("/user?email=").await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn test_update_user_by_email() {
    let server = common::spawn_server().await;
    server.create_user("Ana", 30, "a@x.com").await;

    let (status, text) = server
        .put_json(
            "/user",
            json!({ "name": "Ana Maria", "age": 31, "email": "a@x.com", "cars": [] }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(text, "OK");

    let (_, user) = server.get_json("/user?email=a@x.com").await;
    assert_eq!(user["name"], "Ana Maria");
    assert_eq!(user["age"], 31);
}

#[tokio::test]
async fn test_update_user_unchanged_is_not_found() {
    let server = common::spawn_server().await;
    server.create_user("Ana", 30, "a@x.com").await;

    let (status, text) = server
        .put_json(
            "/user",
            json!({ "name": "Ana", "age": 30, "email": "a@x.com", "cars": [] }),
        )
        .await;
    assert_eq!(status, 404);
    assert_eq!(text, "User not found");
}

#[tokio::test]
async fn test_update_user_errors() {
    let server = common::spawn_server().await;
    server.create_user("Ana", 30, "a@x.com").await;

    let (status, text) = server
        .put_json("/user", json!({ "name": "Ana", "email": "a@x.com", "cars": [] }))
        .await;
    assert_eq!(status, 404);
    assert_eq!(text, "Bad request");

    let (status, text) = server
        .put_json(
            "/user",
            json!({ "name": "Ana", "age": 44, "email": "zz@x.com", "cars": [] }),
        )
        .await;
    assert_eq!(status, 404);
    assert_eq!(text, "User not found");

    let (status, text) = server
        .put_json(
            "/user",
            json!({ "name": "Ana", "age": 44, "email": "a@x.com", "cars": ["bogus"] }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(text, "Invalid id");
}

#[tokio::test]
async fn test_delete_user() {
    let server = common::spawn_server().await;
    let created = server.create_user("Ana", 30, "a@x.com").await;
    let id = created["id"].as_str().unwrap();

    let (status, text) = server.delete(&format!("/user?id={id}")).await;
    assert_eq!(status, 200);
    assert_eq!(text, "OK");

    let (status, text) = server.delete(&format!("/user?id={id}")).await;
    assert_eq!(status, 404);
    assert_eq!(text, "User not found");

    let (status, _) = server.delete("/user").await;
    assert_eq!(status, 400);

    let (status, text) = server.delete("/user?id=xyz").await;
    assert_eq!(status, 400);
    assert_eq!(text, "Invalid id");
}

#[tokio::test]
async fn test_repeated_query_keys_use_first_value() {
    let server = common::spawn_server().await;
    let ana = server.create_user("Ana", 30, "a@x.com").await;
    server.create_user("Bob", 40, "b@x.com").await;

    let (status, users) = server.get_json("/users?name=Ana&name=Bob").await;
    assert_eq!(status, 200);
    let names: Vec<&str> = users
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ana"]);

    let (status, user) = server.get_json("/user?email=b@x.com&email=a@x.com").await;
    assert_eq!(status, 200);
    assert_eq!(user["name"], "Bob");

    let (status, text) = server.get_text("/user?email=&email=a@x.com").await;
    assert_eq!(status, 400);
    assert_eq!(text, "Bad request");

    let id = ana["id"].as_str().unwrap();
    let (status, text) = server.delete(&format!("/user?id=bogus&id={id}")).await;
    assert_eq!(status, 400);
    assert_eq!(text, "Invalid id");

    let (status, _) = server.delete(&format!("/user?id={id}&id=bogus")).await;
    assert_eq!(status, 200);
}

#[tokio::test]
async fn test_fractional_age_is_kept() {
    let server = common::spawn_server().await;

    let res = server
        .client
        .post(server.url("/user"))
        .json(&json!({ "name": "Ana", "age": 30.5, "email": "a@x.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    let created: serde_json::Value = res.json().await.unwrap();
    assert_eq!(created["age"], 30.5);

    let (status, _) = server
        .put_json(
            "/user",
            json!({ "name": "Ana", "age": 31.25, "email": "a@x.com", "cars": [] }),
        )
        .await;
    assert_eq!(status, 200);

    let (_, user) = server.get_json("/user?email=a@x.com").await;
    assert_eq!(user["age"], 31.25);
}
