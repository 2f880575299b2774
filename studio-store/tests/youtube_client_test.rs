use httpmock::prelude::*;
use serde_json::json;
use studio_core::search::{SearchError, VideoSearch};
use studio_store::YoutubeClient;

#[tokio::test]
async fn test_search_maps_items() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("part", "snippet")
            .query_param("q", "minecraft edit")
            .query_param("type", "video")
            .query_param("maxResults", "3")
            .query_param("key", "test-key");
        then.status(200).json_body(json!({
            "items": [
                {
                    "id": { "kind": "youtube#video", "videoId": "abc123def45" },
                    "snippet": {
                        "title": "Best edit",
                        "channelTitle": "Crazy",
                        "thumbnails": {
                            "default": { "url": "https://i.ytimg.com/default.jpg" },
                            "medium": { "url": "https://i.ytimg.com/medium.jpg" }
                        }
                    }
                },
                {
                    "id": { "kind": "youtube#video", "videoId": "zyx987wvu65" },
                    "snippet": {
                        "title": "Second",
                        "channelTitle": "Other",
                        "thumbnails": { "default": { "url": "https://i.ytimg.com/d2.jpg" } }
                    }
                }
            ]
        }));
    });

    let client = YoutubeClient::new(&server.base_url(), Some("test-key".to_string()));
    let videos = client.search("minecraft edit", 3).await.unwrap();

    mock.assert();
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].video_id, "abc123def45");
    assert_eq!(videos[0].thumbnail.as_deref(), Some("https://i.ytimg.com/medium.jpg"));
    assert_eq!(videos[0].url, "https://www.youtube.com/watch?v=abc123def45");
    assert_eq!(videos[1].thumbnail.as_deref(), Some("https://i.ytimg.com/d2.jpg"));
    assert_eq!(videos[1].shorts_url, "https://www.youtube.com/shorts/zyx987wvu65");
}

#[tokio::test]
async fn test_upstream_error_keeps_status_and_message() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(403).json_body(json!({
            "error": { "code": 403, "message": "quotaExceeded" }
        }));
    });

    let client = YoutubeClient::new(&server.base_url(), Some("test-key".to_string()));
    match client.search("anything", 5).await {
        Err(SearchError::Upstream { status, message }) => {
            assert_eq!(status, 403);
            assert_eq!(message, "quotaExceeded");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_upstream_error_without_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/search");
        then.status(502).body("bad gateway");
    });

    let client = YoutubeClient::new(&server.base_url(), Some("test-key".to_string()));
    match client.search("anything", 5).await {
        Err(SearchError::Upstream { status, message }) => {
            assert_eq!(status, 502);
            assert_eq!(message, "YouTube API error");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_key_and_empty_query() {
    let client = YoutubeClient::new("http://127.0.0.1:9", None);
    assert!(matches!(client.search("edits", 5).await, Err(SearchError::NotConfigured)));

    let client = YoutubeClient::new("http://127.0.0.1:9", Some("key".to_string()));
    assert!(matches!(client.search("   ", 5).await, Err(SearchError::EmptyQuery)));
}
