//! Controller driven through the HTTP client against a mock server.

use std::sync::Arc;

use spendwise_client::{ApiConfig, SpendwiseClient};
use spendwise_core::{ExpenseDraft, ExpenseId, UserId};
use spendwise_expenses::{ExpenseListController, LoadOutcome};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn page(owner: &str, ids: std::ops::RangeInclusive<u32>) -> serde_json::Value {
    let items: Vec<_> = ids
        .map(|i| {
            serde_json::json!({
                "id": i.to_string(),
                "createdAt": "2025-05-27T05:23:47.813Z",
                "title": format!("Expense {}", i),
                "amount": format!("{}.50", i),
                "category": "Food",
                "description": "",
                "ownerId": owner
            })
        })
        .collect();
    serde_json::Value::Array(items)
}

async fn controller_for(server: &MockServer, page_size: u32) -> ExpenseListController {
    let client = SpendwiseClient::new(ApiConfig::new(server.uri())).unwrap();
    ExpenseListController::with_page_size(Arc::new(client), page_size)
}

#[tokio::test]
async fn pages_through_owner_expenses_until_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/expenses"))
        .and(query_param("ownerId", "7"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page("7", 1..=5)))
        .expect(1)
        .mount(&mock_server)
        .await;

    // mockapi answers past-the-end pages with 404
    Mock::given(method("GET"))
        .and(path("/expenses"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(404).set_body_json("Not found"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let controller = controller_for(&mock_server, 5).await;

    assert_eq!(
        controller.set_owner(Some(UserId::new("7"))).await,
        LoadOutcome::Loaded { page: 1, count: 5 }
    );
    assert!(controller.has_more());
    assert_eq!(controller.expenses()[0].amount, 1.5);

    assert_eq!(
        controller.load_next_page().await,
        LoadOutcome::Loaded { page: 2, count: 0 }
    );
    assert!(!controller.has_more());
    assert_eq!(controller.expenses().len(), 5);
    assert_eq!(controller.total_spent(), 1.5 + 2.5 + 3.5 + 4.5 + 5.5);
}

#[tokio::test]
async fn server_error_is_absorbed_by_load() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/expenses"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let controller = controller_for(&mock_server, 10).await;

    assert_eq!(
        controller.set_owner(Some(UserId::new("7"))).await,
        LoadOutcome::Failed
    );
    assert!(controller.expenses().is_empty());
    assert!(!controller.is_loading());
}

#[tokio::test]
async fn created_expense_is_prepended_and_delete_404_propagates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/expenses"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page("7", 1..=2)))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/expenses"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "99",
            "createdAt": "2025-06-01T08:00:00.000Z",
            "title": "Coffee",
            "amount": 4.5,
            "category": "Food",
            "description": "",
            "ownerId": "7"
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/expenses/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let controller = controller_for(&mock_server, 10).await;
    controller.set_owner(Some(UserId::new("7"))).await;

    let created = controller
        .create_expense(ExpenseDraft {
            title: "Coffee".into(),
            amount: 4.5,
            category: "Food".into(),
            description: String::new(),
        })
        .await
        .unwrap();

    assert_eq!(created.id, ExpenseId::new("99"));
    let ids: Vec<_> = controller
        .expenses()
        .iter()
        .map(|e| e.id.to_string())
        .collect();
    assert_eq!(ids, ["99", "1", "2"]);

    assert!(controller.delete_expense(&ExpenseId::new("1")).await.is_err());
    assert_eq!(controller.expenses().len(), 3);
}
