use mockito::Server;
use portfolio_generator::core::gate::{AccessGate, FeatureFlag, QuotaLimits};
use portfolio_generator::core::{ConfigManager, Database};
use portfolio_generator::environment::EnvironmentConfig;
use portfolio_generator::web::build_rocket;
use portfolio_generator::PortfolioData;
use rocket::http::{ContentType, Header, Status};
use rocket::local::asynchronous::Client;
use serde_json::{json, Value};

const BOUNDARY: &str = "folio-test-boundary";

fn config_with(vars: &[(&str, String)]) -> ConfigManager {
    let vars: Vec<(String, String)> = vars.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
    ConfigManager::from_parts(EnvironmentConfig::default(), move |key| {
        vars.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    })
    .unwrap()
}

async fn client_with(config: ConfigManager, limits: QuotaLimits) -> (Client, AccessGate) {
    let db = Database::in_memory().await.unwrap();
    let gate = AccessGate::new(db.clone(), limits);
    let handle = AccessGate::new(db, limits);
    let rocket = build_rocket(&config, gate).unwrap();
    (Client::tracked(rocket).await.unwrap(), handle)
}

async fn default_client() -> (Client, AccessGate) {
    client_with(config_with(&[]), QuotaLimits::default()).await
}

fn multipart(file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn multipart_type() -> ContentType {
    ContentType::new("multipart", "form-data").with_params(("boundary", BOUNDARY))
}

fn one_page_pdf() -> Vec<u8> {
    let mut pdf = b"%PDF-1.4\n1 0 obj << /Type /Page /Parent 2 0 R >> endobj\n".to_vec();
    pdf.resize(2048, b' ');
    pdf.extend_from_slice(b"\n%%EOF\n");
    pdf
}

async fn json_body(response: rocket::local::asynchronous::LocalResponse<'_>) -> Value {
    serde_json::from_str(&response.into_string().await.unwrap()).unwrap()
}

#[rocket::async_test]
async fn health_and_sample() {
    let (client, _) = default_client().await;

    let response = client.get("/api/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(json_body(response).await["success"], json!(true));

    let response = client.get("/api/sample").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response).await;
    assert_eq!(body["settings"]["name"], json!("Alex Morgan"));
}

#[rocket::async_test]
async fn preview_returns_html_and_honors_theme() {
    let (client, _) = default_client().await;
    let data = serde_json::to_string(&PortfolioData::sample()).unwrap();

    let response = client
        .post("/api/preview?theme=dark")
        .header(ContentType::JSON)
        .body(&data)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::HTML));
    let html = response.into_string().await.unwrap();
    assert!(html.contains(r#"data-theme="dark""#));

    let response = client
        .post("/api/preview?theme=sepia")
        .header(ContentType::JSON)
        .body(&data)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(json_body(response).await["error_code"], json!("INVALID_THEME"));
}

#[rocket::async_test]
async fn export_lists_every_file() {
    let (client, _) = default_client().await;
    let mut data = PortfolioData::sample();
    data.settings.primary_color = "teal".to_string();

    let response = client
        .post("/api/export?mode=published")
        .header(ContentType::JSON)
        .body(serde_json::to_string(&data).unwrap())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);

    let body = json_body(response).await;
    let paths: Vec<&str> = body["data"]["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["path"].as_str().unwrap())
        .collect();
    assert_eq!(
        paths,
        vec!["index.html", "styles.css", "script.js", "tailwind.config.js", "portfolio-data.json"]
    );
    assert_eq!(body["data"]["issues"][0]["field"], json!("settings.primaryColor"));

    let response = client
        .post("/api/export?mode=zip")
        .header(ContentType::JSON)
        .body(serde_json::to_string(&data).unwrap())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
}

#[rocket::async_test]
async fn disabled_resume_processing_is_unavailable() {
    let (client, gate) = default_client().await;
    gate.set_flag(FeatureFlag::ResumeProcessing, false).await.unwrap();

    let response = client
        .post("/api/process-resume")
        .header(multipart_type())
        .body(multipart("cv.pdf", &one_page_pdf()))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::ServiceUnavailable);
    assert_eq!(json_body(response).await["type"], json!("SERVICE_UNAVAILABLE"));
}

#[rocket::async_test]
async fn invalid_uploads_are_rejected_and_count_toward_quota() {
    let limits = QuotaLimits {
        resume_per_day: 1,
        deploy_per_day: 10,
    };
    let (client, _) = client_with(config_with(&[]), limits).await;

    let response = client
        .post("/api/process-resume")
        .header(multipart_type())
        .body(multipart("notes.txt", b"just some text, definitely not a pdf"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(json_body(response).await["type"], json!("VALIDATION_ERROR"));

    let response = client
        .post("/api/process-resume")
        .header(multipart_type())
        .body(multipart("cv.pdf", &one_page_pdf()))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::TooManyRequests);
    assert_eq!(json_body(response).await["type"], json!("RATE_LIMITED"));
}

#[rocket::async_test]
async fn resume_is_forwarded_to_extraction_service() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/process-resume")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"portfolioData": {"settings": {"name": "Sam Lee"}}}"#)
        .create_async()
        .await;

    let config = config_with(&[("EXTRACTION_SERVICE_URL", server.url())]);
    let (client, _) = client_with(config, QuotaLimits::default()).await;

    let response = client
        .post("/api/process-resume")
        .header(multipart_type())
        .body(multipart("cv.pdf", &one_page_pdf()))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response).await;
    assert_eq!(body["portfolioData"]["settings"]["name"], json!("Sam Lee"));
    mock.assert_async().await;
}

#[rocket::async_test]
async fn github_deploy_respects_flag_and_token() {
    let (client, gate) = default_client().await;
    let request = json!({
        "portfolioData": PortfolioData::sample(),
        "repoName": "portfolio",
        "token": "  "
    });

    let response = client
        .post("/api/deploy/github")
        .header(ContentType::JSON)
        .body(request.to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(json_body(response).await["error_code"], json!("MISSING_TOKEN"));

    gate.set_flag(FeatureFlag::GithubDeploy, false).await.unwrap();
    let mut request = request;
    request["token"] = json!("gh-token");
    let response = client
        .post("/api/deploy/github")
        .header(ContentType::JSON)
        .body(request.to_string())
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::ServiceUnavailable);
    assert_eq!(json_body(response).await["error_code"], json!("FEATURE_DISABLED"));
}

#[rocket::async_test]
async fn netlify_deploy_returns_urls() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/sites")
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "s1", "url": "http://sam.netlify.app", "ssl_url": "https://sam.netlify.app", "admin_url": "https://app.netlify.com/sites/sam"}"#)
        .create_async()
        .await;
    server
        .mock("POST", "/sites/s1/deploys")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": "d1", "required": []}"#)
        .create_async()
        .await;

    let config = config_with(&[("NETLIFY_API_URL", server.url())]);
    let (client, gate) = client_with(config, QuotaLimits::default()).await;

    let response = client
        .post("/api/deploy/netlify")
        .header(ContentType::JSON)
        .body(
            json!({
                "portfolioData": PortfolioData::sample(),
                "siteName": "sam",
                "token": "nf-token"
            })
            .to_string(),
        )
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let body = json_body(response).await;
    assert_eq!(body["url"], json!("https://sam.netlify.app"));
    assert_eq!(body["adminUrl"], json!("https://app.netlify.com/sites/sam"));
    assert!(gate.is_enabled(FeatureFlag::NetlifyDeploy).await.unwrap());
}

#[rocket::async_test]
async fn flags_and_waitlist() {
    let (client, gate) = default_client().await;

    let response = client.get("/api/flags").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(json_body(response).await["data"].as_array().unwrap().len(), 3);

    let response = client
        .post("/api/waitlist")
        .header(ContentType::JSON)
        .body(r#"{"email": "Sam@Example.com", "feature": "github_deploy"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(gate.waitlist_count(FeatureFlag::GithubDeploy).await.unwrap(), 1);

    let response = client
        .post("/api/waitlist")
        .header(ContentType::JSON)
        .body(r#"{"email": "nope", "feature": "github_deploy"}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    assert_eq!(json_body(response).await["error_code"], json!("INVALID_EMAIL"));
}

#[rocket::async_test]
async fn cors_preflight_and_unknown_routes() {
    let (client, _) = default_client().await;

    let response = client
        .options("/api/deploy/github")
        .header(Header::new("Origin", "https://editor.example"))
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );

    let response = client.get("/api/missing").dispatch().await;
    assert_eq!(response.status(), Status::NotFound);
    assert_eq!(json_body(response).await["error_code"], json!("NOT_FOUND"));
}
