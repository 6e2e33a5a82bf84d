use std::collections::HashMap;

use sensai_core::backend::BackendClient;
use sensai_core::forms::{Branch, FormData};
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{
    body_json, body_string_contains, header, header_regex, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_chapter_submission_sends_exactly_the_query_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/lessonplan/Lesson_Plan"))
        .and(header("accept", "application/json"))
        .and(query_param("Number_of_Lecture", "1"))
        .and(query_param("Duration_of_Lecture", "45"))
        .and(query_param("Class_Strength", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = FormData::defaults(Branch::ChapterLessonPlan);
    form.set_from_str("Board", "CBSE").unwrap();
    let body = BackendClient::new(server.uri()).submit(&form).await.unwrap();
    assert_eq!(body, json!({"status": "success"}));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());

    let params: HashMap<String, String> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let expected: HashMap<String, String> = [
        ("Board", "CBSE"),
        ("Grade", ""),
        ("Subject", ""),
        ("Chapter_Number", ""),
        ("Number_of_Lecture", "1"),
        ("Duration_of_Lecture", "45"),
        ("Class_Strength", "30"),
        ("Language", "english"),
        ("Quiz", "true"),
        ("Assignment", "true"),
        ("Structured_Output", "true"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(params, expected);
}

#[tokio::test]
async fn test_non_2xx_with_json_body_is_returned() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/lessonplan/Lesson_Plan"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"status": "error", "message": "Model overloaded"})),
        )
        .mount(&server)
        .await;

    let body = BackendClient::new(server.uri())
        .submit(&FormData::defaults(Branch::ChapterLessonPlan))
        .await
        .unwrap();

    assert_eq!(body["message"], "Model overloaded");
}

#[tokio::test]
async fn test_unparseable_body_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/student/assessment"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = BackendClient::new(server.uri())
        .submit(&FormData::defaults(Branch::Assessment))
        .await
        .unwrap_err();

    assert!(format!("{err:#}").contains("Failed to parse backend response (HTTP 502"));
}

#[tokio::test]
async fn test_topic_submission_uploads_pdf() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();
    let pdf = dir.path().join("notes.pdf");
    std::fs::write(&pdf, b"%PDF-1.4 test").unwrap();

    Mock::given(method("POST"))
        .and(path("/lessonplan/Lesson_Plan_from_Topic"))
        .and(query_param("Topic", "Quadratic Equations"))
        .and(query_param("Class_Strength", "30"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("name=\"file\"; filename=\"notes.pdf\""))
        .and(body_string_contains("%PDF-1.4 test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = FormData::defaults(Branch::TopicLessonPlan);
    form.set_from_str("Topic", "Quadratic Equations").unwrap();
    form.set_from_str("file", pdf.to_str().unwrap()).unwrap();

    BackendClient::new(server.uri()).submit(&form).await.unwrap();
}

#[tokio::test]
async fn test_topic_submission_without_file_is_still_multipart() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/lessonplan/Lesson_Plan_from_Topic"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    BackendClient::new(server.uri())
        .submit(&FormData::defaults(Branch::TopicLessonPlan))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_missing_attachment_fails_before_sending() {
    let server = MockServer::start().await;
    let dir = tempdir().unwrap();

    let mut form = FormData::defaults(Branch::TopicLessonPlan);
    form.set_from_str("file", dir.path().join("missing.pdf").to_str().unwrap())
        .unwrap();

    let err = BackendClient::new(server.uri())
        .submit(&form)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Failed to read attachment"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_assessment_submission_posts_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/student/assessment"))
        .and(body_json(json!({
            "Board": "ICSE",
            "Grade": "8th",
            "Subject": "Science",
            "Chapter_Number": "4",
            "Number_of_Lecture": 2,
            "Duration_of_Lecture": 40,
            "Language": "hindi",
            "Quiz": true,
            "Assignment": false,
            "Structured_Output": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"thread_id": "t-9"})))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = FormData::defaults(Branch::Assessment);
    for (key, value) in [
        ("Board", "ICSE"),
        ("Grade", "8th"),
        ("Subject", "Science"),
        ("Chapter_Number", "4"),
        ("Number_of_Lecture", "2"),
        ("Duration_of_Lecture", "40"),
        ("Language", "hindi"),
        ("Assignment", "false"),
    ] {
        form.set_from_str(key, value).unwrap();
    }

    let body = BackendClient::new(server.uri()).submit(&form).await.unwrap();
    assert_eq!(body["thread_id"], "t-9");
}

#[tokio::test]
async fn test_assessment_follow_ups() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/student/assessment/continue"))
        .and(body_json(json!({"thread_id": "t-9", "message": "42"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Correct!"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/student/assessment/t-9/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "in_progress"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = BackendClient::new(server.uri());
    let reply = client.continue_assessment("t-9", "42").await.unwrap();
    assert_eq!(reply["message"], "Correct!");

    let status = client.assessment_status("t-9").await.unwrap();
    assert_eq!(status["status"], "in_progress");
}
