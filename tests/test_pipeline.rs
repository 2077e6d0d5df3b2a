use recipe_harvest::{run_batch, CozeClient, Workbook, RECIPES_SHEET};
use tempfile::tempdir;

fn answer_envelope(content: &str) -> String {
    serde_json::json!({
        "messages": [
            {"role": "assistant", "type": "answer", "content": content}
        ]
    })
    .to_string()
}

#[tokio::test]
async fn test_full_pipeline_appends_rows_with_sequential_ids() {
    let mut server = mockito::Server::new_async().await;
    let recipe_json = r#"{
        "name": "Tomato Egg Stir-fry",
        "cook_time": "15",
        "steps": [{"step": 1, "content": "Beat the eggs."}],
        "tools": ["wok"]
    }"#;
    let mock = server
        .mock("POST", "/open_api/v2/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(answer_envelope(recipe_json))
        .expect(2)
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let names_path = dir.path().join("names.txt");
    std::fs::write(&names_path, "Tomato Egg Stir-fry\nTomato Egg Stir-fry\n").unwrap();
    let store_path = dir.path().join("database.json");

    let client = CozeClient::with_base_url(
        "fake_token".to_string(),
        server.url(),
        "test_bot".to_string(),
    );
    let summary = run_batch(&client, &names_path, &store_path).await.unwrap();

    assert_eq!(summary.total, 2);
    assert_eq!(summary.saved, 2);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.failed, 0);
    mock.assert_async().await;

    let workbook = Workbook::load(&store_path).unwrap();
    let sheet = workbook.sheet(RECIPES_SHEET).unwrap();
    assert_eq!(sheet.data_rows(), 2);

    let id_col = sheet.column("id").unwrap();
    let name_col = sheet.column("name").unwrap();
    assert_eq!(sheet.cell(0, id_col), "1");
    assert_eq!(sheet.cell(1, id_col), "2");
    assert_eq!(sheet.cell(0, name_col), "Tomato Egg Stir-fry");

    // header exists exactly once, as row 0
    let header_rows = sheet
        .rows
        .iter()
        .filter(|row| row.first().map(String::as_str) == Some("id"))
        .count();
    assert_eq!(header_rows, 1);
}

#[tokio::test]
async fn test_plain_text_answer_is_skipped_not_saved() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/open_api/v2/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(answer_envelope("I do not know that dish."))
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let names_path = dir.path().join("names.txt");
    std::fs::write(&names_path, "Mystery Dish\n").unwrap();
    let store_path = dir.path().join("database.json");

    let client = CozeClient::with_base_url(
        "fake_token".to_string(),
        server.url(),
        "test_bot".to_string(),
    );
    let summary = run_batch(&client, &names_path, &store_path).await.unwrap();

    assert_eq!(summary.saved, 0);
    assert_eq!(summary.skipped, 1);
    assert!(!store_path.exists());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_answer_missing_steps_is_rejected_upstream_of_appender() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/open_api/v2/chat")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(answer_envelope(r#"{"name": "Bare Dish"}"#))
        .create_async()
        .await;

    let dir = tempdir().unwrap();
    let names_path = dir.path().join("names.txt");
    std::fs::write(&names_path, "Bare Dish\n").unwrap();
    let store_path = dir.path().join("database.json");

    let client = CozeClient::with_base_url(
        "fake_token".to_string(),
        server.url(),
        "test_bot".to_string(),
    );
    let summary = run_batch(&client, &names_path, &store_path).await.unwrap();

    assert_eq!(summary.saved, 0);
    assert_eq!(summary.skipped, 1);
    // nothing reached the appender, so no store was created
    assert!(!store_path.exists());
    mock.assert_async().await;
}
