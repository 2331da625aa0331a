use expform::api::{ApiError, ExperimentApi, HttpExperimentApi, SubmittedExperiment};
use expform::shared::ids::ExperimentId;
use expform::spec::{ExperimentSpec, Replicas, SpecEnvironment, SpecMeta, SpecResource, Specs};
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

struct CapturedRequest {
    request_line: String,
    body: String,
}

fn spawn_api_server(
    status_line: &str,
    response_body: &str,
) -> (String, mpsc::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    let status_line = status_line.to_string();
    let response_body = response_body.to_string();
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));

        let mut request_line = String::new();
        reader
            .read_line(&mut request_line)
            .expect("read request line");

        let mut content_length = 0usize;
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).expect("read header line");
            if line == "\r\n" || line.is_empty() {
                break;
            }
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().expect("content length");
                }
            }
        }
        let mut body = vec![0_u8; content_length];
        reader.read_exact(&mut body).expect("read body");

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            response_body.len(),
            response_body
        );
        stream
            .write_all(response.as_bytes())
            .expect("write response");
        let _ = tx.send(CapturedRequest {
            request_line: request_line.trim_end().to_string(),
            body: String::from_utf8_lossy(&body).to_string(),
        });
    });

    (format!("http://{}", addr), rx)
}

fn sample_spec() -> ExperimentSpec {
    let mut spec = Specs::new();
    spec.insert(
        "Worker".to_string(),
        SpecResource {
            replicas: Replicas::Count(1),
            resources: "cpu=1,memory=1024M".to_string(),
        },
    );
    ExperimentSpec {
        meta: SpecMeta {
            name: "tf-mnist".to_string(),
            namespace: "default".to_string(),
            framework: "Tensorflow".to_string(),
            cmd: "python train.py".to_string(),
            description: None,
            env_vars: BTreeMap::new(),
        },
        environment: SpecEnvironment {
            image: "mnist:latest".to_string(),
        },
        spec,
    }
}

fn client(base: &str) -> HttpExperimentApi {
    HttpExperimentApi::new(base, Duration::from_secs(5))
}

#[test]
fn create_posts_the_spec_and_reads_the_envelope() {
    let (base, requests) = spawn_api_server(
        "200 OK",
        r#"{"success":true,"code":200,"message":"","result":{"experimentId":"experiment_1_0001","status":"Accepted"}}"#,
    );

    let submitted = client(&base)
        .create_experiment(&sample_spec())
        .expect("create");
    assert_eq!(
        submitted,
        SubmittedExperiment {
            experiment_id: Some("experiment_1_0001".to_string()),
            status: Some("Accepted".to_string()),
        }
    );

    let request = requests.recv().expect("captured request");
    assert_eq!(request.request_line, "POST /api/v1/experiment HTTP/1.1");
    let body: ExperimentSpec = serde_json::from_str(&request.body).expect("spec body");
    assert_eq!(body, sample_spec());
}

#[test]
fn update_patches_the_experiment_path() {
    let (base, requests) = spawn_api_server(
        "200 OK",
        r#"{"success":true,"result":{"experimentId":"experiment_1_0001"}}"#,
    );
    let id = ExperimentId::parse("experiment_1_0001").expect("id");

    client(&format!("{base}/"))
        .update_experiment(&id, &sample_spec())
        .expect("update");

    let request = requests.recv().expect("captured request");
    assert_eq!(
        request.request_line,
        "PATCH /api/v1/experiment/experiment_1_0001 HTTP/1.1"
    );
}

#[test]
fn http_error_status_surfaces_the_server_message() {
    let (base, _requests) = spawn_api_server(
        "409 Conflict",
        r#"{"success":false,"code":409,"message":"experiment tf-mnist already exists"}"#,
    );

    let err = client(&base)
        .create_experiment(&sample_spec())
        .expect_err("conflict");
    assert_eq!(
        err,
        ApiError::Rejected {
            status: 409,
            message: "experiment tf-mnist already exists".to_string(),
        }
    );
    assert_eq!(err.to_string(), "experiment tf-mnist already exists");
}

#[test]
fn success_false_in_a_200_envelope_is_a_rejection() {
    let (base, _requests) = spawn_api_server(
        "200 OK",
        r#"{"success":false,"code":400,"message":"invalid resources"}"#,
    );

    let err = client(&base)
        .create_experiment(&sample_spec())
        .expect_err("rejected");
    assert!(matches!(err, ApiError::Rejected { status: 400, .. }));
}

#[test]
fn non_json_body_is_a_decode_error() {
    let (base, _requests) = spawn_api_server("200 OK", "<html>gateway</html>");

    let err = client(&base)
        .create_experiment(&sample_spec())
        .expect_err("decode");
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn unreachable_server_is_a_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .create_experiment(&sample_spec())
        .expect_err("refused");
    assert!(matches!(err, ApiError::Request(_)));
}
