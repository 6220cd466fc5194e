use mockito::{Matcher, Mock, Server, ServerGuard};
use pmosync::{PlaylistService, SyncError, SyncPlan, Synchronizer, fetch_all};
use pmoyoutube::{OAuthCredentials, YoutubeClient, YoutubeError};
use serde_json::json;

const ACCESS_TOKEN: &str = "ya29.test";

fn credentials() -> OAuthCredentials {
    OAuthCredentials::new("client.apps.googleusercontent.com", "secret", "1//refresh")
}

async fn mock_token(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", "/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            Matcher::UrlEncoded("refresh_token".into(), "1//refresh".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({ "access_token": ACCESS_TOKEN, "expires_in": 3599, "token_type": "Bearer" })
                .to_string(),
        )
        .create_async()
        .await
}

async fn client(server: &ServerGuard) -> YoutubeClient {
    YoutubeClient::with_endpoints(
        credentials(),
        &server.url(),
        &format!("{}/token", server.url()),
    )
    .await
    .unwrap()
}

fn item(entry_id: &str, video_id: &str, title: &str) -> serde_json::Value {
    json!({
        "kind": "youtube#playlistItem",
        "id": entry_id,
        "snippet": {
            "title": title,
            "playlistId": "PLtarget",
            "resourceId": { "kind": "youtube#video", "videoId": video_id }
        },
        "contentDetails": { "videoId": video_id },
        "status": { "privacyStatus": "public" }
    })
}

/// Première page : exactement trois paramètres, donc sans `pageToken`
fn first_page_query(playlist_id: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::Regex("^[^&]*&[^&]*&[^&]*$".into()),
        Matcher::UrlEncoded("playlistId".into(), playlist_id.into()),
        Matcher::UrlEncoded("maxResults".into(), "50".into()),
    ])
}

fn not_accessible_body() -> String {
    json!({
        "error": {
            "code": 403,
            "message": "The request is not properly authorized to retrieve the specified playlist.",
            "errors": [{ "domain": "youtube.playlistItem", "reason": "playlistItemsNotAccessible" }]
        }
    })
    .to_string()
}

#[tokio::test]
async fn test_client_authenticates_on_creation() {
    let mut server = Server::new_async().await;
    let token = mock_token(&mut server).await;

    let client = client(&server).await;

    token.assert_async().await;
    assert!(client.api().is_authenticated().await);
}

#[tokio::test]
async fn test_revoked_refresh_token() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/token")
        .with_status(400)
        .with_body(
            json!({ "error": "invalid_grant", "error_description": "Token has been expired or revoked." })
                .to_string(),
        )
        .create_async()
        .await;

    let result = YoutubeClient::with_endpoints(
        credentials(),
        &server.url(),
        &format!("{}/token", server.url()),
    )
    .await;

    match result {
        Err(YoutubeError::Unauthorized(message)) => {
            assert_eq!(message, "invalid_grant: Token has been expired or revoked.")
        }
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("a revoked token must not authenticate"),
    }
}

#[tokio::test]
async fn test_fetch_all_follows_page_tokens() {
    let mut server = Server::new_async().await;
    mock_token(&mut server).await;

    let first = server
        .mock("GET", "/playlistItems")
        .match_query(first_page_query("PLtarget"))
        .match_header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "items": [item("e1", "A", "Song A"), item("e2", "B", "Private video")],
                "nextPageToken": "CAIQAA"
            })
            .to_string(),
        )
        .create_async()
        .await;
    let second = server
        .mock("GET", "/playlistItems")
        .match_query(Matcher::UrlEncoded("pageToken".into(), "CAIQAA".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "items": [item("e3", "A", "Song A")] }).to_string())
        .create_async()
        .await;

    let client = client(&server).await;
    let items = fetch_all(&client, "PLtarget").await.unwrap();

    first.assert_async().await;
    second.assert_async().await;
    let ids: Vec<&str> = items.iter().map(|i| i.content_id.as_str()).collect();
    assert_eq!(ids, vec!["A", "B", "A"]);
    assert_eq!(items[1].label(), Some("Private video"));
    assert_eq!(items[2].entry_id, "e3");
}

#[tokio::test]
async fn test_items_without_video_are_dropped() {
    let mut server = Server::new_async().await;
    mock_token(&mut server).await;
    server
        .mock("GET", "/playlistItems")
        .match_query(first_page_query("PLx"))
        .with_status(200)
        .with_body(
            json!({ "items": [item("e1", "A", "Song A"), { "id": "e2", "snippet": { "title": "Deleted video" } }] })
                .to_string(),
        )
        .create_async()
        .await;

    let client = client(&server).await;
    let page = client.list_members("PLx", None, 50).await.unwrap();

    assert_eq!(page.items.len(), 1);
    assert!(page.next_page_token.is_none());
}

#[tokio::test]
async fn test_insert_sends_video_resource() {
    let mut server = Server::new_async().await;
    mock_token(&mut server).await;
    let insert = server
        .mock("POST", "/playlistItems")
        .match_query(Matcher::UrlEncoded("part".into(), "snippet".into()))
        .match_header("authorization", format!("Bearer {ACCESS_TOKEN}").as_str())
        .match_body(Matcher::PartialJsonString(
            json!({
                "snippet": {
                    "playlistId": "PLtarget",
                    "resourceId": { "kind": "youtube#video", "videoId": "dQw4w9WgXcQ" }
                }
            })
            .to_string(),
        ))
        .with_status(200)
        .with_body(item("new-entry", "dQw4w9WgXcQ", "Song").to_string())
        .create_async()
        .await;

    let client = client(&server).await;
    client.insert_member("PLtarget", "dQw4w9WgXcQ").await.unwrap();

    insert.assert_async().await;
}

#[tokio::test]
async fn test_delete_rejection_is_not_accessible() {
    let mut server = Server::new_async().await;
    mock_token(&mut server).await;
    server
        .mock("DELETE", "/playlistItems")
        .match_query(Matcher::UrlEncoded("id".into(), "e2".into()))
        .with_status(403)
        .with_body(not_accessible_body())
        .create_async()
        .await;

    let client = client(&server).await;
    let err = client.delete_member("e2").await.unwrap_err();

    assert!(err.is_not_accessible());
}

#[tokio::test]
async fn test_server_error_is_remote() {
    let mut server = Server::new_async().await;
    mock_token(&mut server).await;
    server
        .mock("GET", "/playlistItems")
        .match_query(first_page_query("PLtarget"))
        .with_status(500)
        .with_body(
            json!({ "error": { "code": 500, "message": "Backend Error", "errors": [{ "reason": "backendError" }] } })
                .to_string(),
        )
        .create_async()
        .await;

    let client = client(&server).await;
    let err = fetch_all(&client, "PLtarget").await.unwrap_err();

    assert!(matches!(err, SyncError::Remote(_)));
}

#[tokio::test]
async fn test_synchronizer_removes_duplicates_remotely() {
    let mut server = Server::new_async().await;
    mock_token(&mut server).await;
    // Lue avant et après la déduplication
    let list = server
        .mock("GET", "/playlistItems")
        .match_query(first_page_query("PLtarget"))
        .with_status(200)
        .with_body(
            json!({ "items": [item("e1", "A", "Song A"), item("e2", "A", "Song A")] }).to_string(),
        )
        .expect(2)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", "/playlistItems")
        .match_query(Matcher::UrlEncoded("id".into(), "e2".into()))
        .with_status(204)
        .create_async()
        .await;

    let client = client(&server).await;
    let report = Synchronizer::new(&client)
        .run(&SyncPlan::new("PLtarget", Vec::new()))
        .await
        .unwrap();

    list.assert_async().await;
    delete.assert_async().await;
    assert_eq!(report.dedup.removed.len(), 1);
    assert_eq!(report.dedup.removed[0].entry_id, "e2");
}
