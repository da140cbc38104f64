use std::sync::Arc;

use rarecandy::catalog::{CatalogError, CatalogService, TcgApiClient};
use rarecandy::core::controller::CardListController;
use rarecandy::core::projection::CardView;
use tokio_test::{assert_err, assert_ok};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param, query_param_is_missing},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn card_json(id: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "supertype": "Pokémon",
        "hp": "60",
        "types": ["Lightning"],
        "attacks": [{"name": "Thunder Shock", "cost": ["Lightning"], "convertedEnergyCost": 1, "damage": "20"}],
        "set": {"id": "base1", "name": "Base", "series": "Base", "total": 102, "releaseDate": "1999/01/09"},
        "number": "58",
        "tcgplayer": {"prices": {"market": 12.5}}
    })
}

fn page_json(cards: Vec<serde_json::Value>, page: u32, page_size: u32, total: u32) -> serde_json::Value {
    serde_json::json!({
        "count": cards.len(),
        "data": cards,
        "page": page,
        "pageSize": page_size,
        "totalCount": total
    })
}

fn client_for(server: &MockServer) -> TcgApiClient {
    TcgApiClient::new(Some(format!("{}/v2", server.uri())))
}

// ============================================================================
// Client Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_cards_sends_page_params() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/cards"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "20"))
        .and(query_param_is_missing("q"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![card_json("base1-58", "Pikachu"), card_json("base1-59", "Ponyta")],
            2,
            20,
            45,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let response = assert_ok!(client_for(&server).fetch_cards(2, 20, None).await);

    assert_eq!(response.page, 2);
    assert_eq!(response.total_count, 45);
    let ids: Vec<&str> = response.data.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["base1-58", "base1-59"]);
}

#[tokio::test]
async fn test_fetch_cards_name_filter_is_prefix_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/cards"))
        .and(query_param("q", "name:\"Pikachu*\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![card_json("base1-58", "Pikachu")],
            1,
            20,
            1,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let response = assert_ok!(client_for(&server).fetch_cards(1, 20, Some("Pikachu")).await);
    assert_eq!(response.data[0].name, "Pikachu");
}

#[tokio::test]
async fn test_fetch_card_unwraps_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/cards/base1-58"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"data": card_json("base1-58", "Pikachu")})),
        )
        .mount(&server)
        .await;

    let card = assert_ok!(client_for(&server).fetch_card("base1-58").await);
    let view = CardView::from_entry(&card);
    assert_eq!(view.card_identifier(), "#58 • Base");
    assert_eq!(view.formatted_market_price().as_deref(), Some("$12"));
}

#[tokio::test]
async fn test_fetch_sets_and_set() {
    let server = MockServer::start().await;

    let set = serde_json::json!({
        "id": "swsh4",
        "name": "Vivid Voltage",
        "series": "Sword & Shield",
        "printedTotal": 185,
        "total": 203,
        "ptcgoCode": "VIV",
        "releaseDate": "2020/11/13",
        "images": {"symbol": "https://images.pokemontcg.io/swsh4/symbol.png"}
    });

    Mock::given(method("GET"))
        .and(path("/v2/sets"))
        .and(query_param("q", "name:\"Vivid*\""))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(vec![set.clone()], 1, 10, 1)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/sets/swsh4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"data": set})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let sets = assert_ok!(client.fetch_sets(1, 10, Some("Vivid")).await);
    assert_eq!(sets.data.len(), 1);
    assert_eq!(sets.data[0].ptcgo_code.as_deref(), Some("VIV"));

    let single = assert_ok!(client.fetch_set("swsh4").await);
    assert_eq!(single.name.as_deref(), Some("Vivid Voltage"));
    assert_eq!(single.printed_total, Some(185));
}

#[tokio::test]
async fn test_fetch_cards_by_set_uses_set_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/cards"))
        .and(query_param("q", "set.id:base1"))
        .and(query_param("page", "1"))
        .and(query_param("pageSize", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![card_json("base1-1", "Alakazam")],
            1,
            5,
            102,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let response = assert_ok!(client_for(&server).fetch_cards_by_set("base1", 1, 5).await);
    assert!(response.has_more_after(1));
}

#[tokio::test]
async fn test_api_key_header_is_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/cards/base1-58"))
        .and(header("X-Api-Key", "secret-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"data": card_json("base1-58", "Pikachu")})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).with_api_key(Some("secret-key".to_string()));
    assert_ok!(client.fetch_card("base1-58").await);
}

#[tokio::test]
async fn test_non_200_is_api_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/cards/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let err = assert_err!(client_for(&server).fetch_card("nope").await);
    match err {
        CatalogError::Api { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "Not Found");
        }
        other => panic!("expected ApiFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_bad_body_is_decoding_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/cards"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data": "not a list"}"#))
        .mount(&server)
        .await;

    let err = assert_err!(client_for(&server).fetch_cards(1, 20, None).await);
    match err {
        CatalogError::Decoding { body, .. } => assert_eq!(body, r#"{"data": "not a list"}"#),
        other => panic!("expected DecodingFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_server_is_transport_failure() {
    // Nothing listens on port 1.
    let client = TcgApiClient::new(Some("http://127.0.0.1:1/v2".to_string()));

    let err = assert_err!(client.fetch_card("base1-58").await);
    assert!(matches!(err, CatalogError::Transport(_)));
    assert!(err.to_string().starts_with("Network error: "));
}

// ============================================================================
// Controller over HTTP
// ============================================================================

#[tokio::test]
async fn test_controller_keeps_entries_on_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/cards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![card_json("base1-58", "Pikachu")],
            1,
            20,
            45,
        )))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/cards"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;

    let mut controller = CardListController::new(Arc::new(client_for(&server)));

    controller.load_initial().await;
    assert_eq!(controller.state().entries.len(), 1);
    assert!(controller.state().has_more_pages);
    assert_eq!(controller.state().result_count_text(), "45 cards");

    controller.refresh().await;
    let state = controller.state();
    assert!(state.show_error);
    assert_eq!(state.error_message.as_deref(), Some("API Error (404): Not Found"));
    assert_eq!(state.entries.len(), 1);
    assert_eq!(state.entries[0].id, "base1-58");
}

#[tokio::test]
async fn test_controller_search_round_trip() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/cards"))
        .and(query_param("q", "name:\"Char*\""))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![card_json("base1-4", "Charizard"), card_json("base1-46", "Charmander")],
            1,
            2,
            3,
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/cards"))
        .and(query_param("q", "name:\"Char*\""))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_json(
            vec![card_json("base1-24", "Charmeleon")],
            2,
            2,
            3,
        )))
        .mount(&server)
        .await;

    let mut controller = CardListController::with_state(
        Arc::new(client_for(&server)),
        rarecandy::core::state::CardList::with_search_text("Char").with_page_size(2),
    );

    controller.search().await;
    assert!(controller.state().has_more_pages);
    controller.load_more().await;

    let state = controller.state();
    assert!(!state.has_more_pages);
    assert_eq!(state.display_title(), "Search Results");
    let names: Vec<&str> = state.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Charizard", "Charmander", "Charmeleon"]);
}

#[tokio::test]
async fn test_blank_card_id_fails_before_any_request() {
    // Nothing listens on port 1, so a Transport error would mean a request went out.
    let client = TcgApiClient::new(Some("http://127.0.0.1:1/v2".to_string()));

    let err = assert_err!(client.fetch_card("").await);
    assert!(matches!(err, CatalogError::InvalidRequest(_)));
    let err = assert_err!(client.fetch_set(" ").await);
    assert!(matches!(err, CatalogError::InvalidRequest(_)));
}
