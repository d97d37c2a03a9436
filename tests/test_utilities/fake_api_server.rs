use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

/// Minimal HTTP server answering the two list endpoints the monitor polls
///
/// Requests without the expected bearer token get `401 Unauthorized`, and
/// requests that do not accept JSON get `406 Not Acceptable`. The listener
/// thread lives until the test process exits.
pub struct FakeApiServer {
    pub base_url: String,
}

struct Responses {
    expected_authorization: String,
    virtual_machines: String,
    volume_snapshots: String,
    volume_snapshots_status: &'static str,
}

impl FakeApiServer {
    pub fn start(token: &str, virtual_machines: &str, volume_snapshots: &str) -> Self {
        Self::start_with_snapshot_status(token, virtual_machines, volume_snapshots, "200 OK")
    }

    /// Like `start`, but the snapshot list answers with `status` (e.g. "403 Forbidden")
    pub fn start_with_snapshot_status(
        token: &str,
        virtual_machines: &str,
        volume_snapshots: &str,
        status: &'static str,
    ) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let address = listener.local_addr().unwrap();
        let responses = Arc::new(Responses {
            expected_authorization: format!("authorization: bearer {}", token.to_lowercase()),
            virtual_machines: virtual_machines.to_string(),
            volume_snapshots: volume_snapshots.to_string(),
            volume_snapshots_status: status,
        });

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { break };
                let responses = Arc::clone(&responses);
                thread::spawn(move || handle(stream, &responses));
            }
        });

        Self {
            base_url: format!("http://{}", address),
        }
    }
}

fn handle(mut stream: TcpStream, responses: &Responses) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());

    let mut request_line = String::new();
    if reader.read_line(&mut request_line).unwrap_or(0) == 0 {
        return;
    }

    let mut authorized = false;
    let mut accepts_json = false;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let header = line.trim_end();
        if header.is_empty() {
            break;
        }
        let header = header.to_lowercase();
        if header == responses.expected_authorization {
            authorized = true;
        }
        if header == "accept: application/json" {
            accepts_json = true;
        }
    }

    let path = request_line.split_whitespace().nth(1).unwrap_or("");
    let (status, body) = if !authorized {
        ("401 Unauthorized", r#"{"kind":"Status","code":401}"#)
    } else if !accepts_json {
        ("406 Not Acceptable", r#"{"kind":"Status","code":406}"#)
    } else if path.ends_with("/virtualmachines") {
        ("200 OK", responses.virtual_machines.as_str())
    } else if path.ends_with("/volumesnapshots") {
        (
            responses.volume_snapshots_status,
            responses.volume_snapshots.as_str(),
        )
    } else {
        ("404 Not Found", r#"{"kind":"Status","code":404}"#)
    };

    let _ = write!(
        stream,
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let _ = stream.flush();
}

pub const VIRTUAL_MACHINES_JSON: &str = r##"{
  "apiVersion": "kubevirt.io/v1",
  "kind": "VirtualMachineList",
  "items": [
    {
      "metadata": { "name": "vm-web" },
      "spec": { "template": { "spec": { "volumes": [
        { "name": "rootdisk", "dataVolume": { "name": "dv-web-root" } },
        { "name": "cloudinit", "cloudInitNoCloud": { "userData": "#cloud-config" } }
      ] } } }
    },
    {
      "metadata": { "name": "vm-db" },
      "spec": { "template": { "spec": { "volumes": [] } } }
    }
  ]
}"##;

pub const VOLUME_SNAPSHOTS_JSON: &str = r##"{
  "apiVersion": "snapshot.storage.k8s.io/v1",
  "kind": "VolumeSnapshotList",
  "items": [
    {
      "metadata": { "name": "snap-old", "creationTimestamp": "2024-05-01T10:00:00Z" },
      "spec": { "source": { "persistentVolumeClaimName": "dv-web-root" } },
      "status": { "readyToUse": true }
    },
    {
      "metadata": { "name": "snap-new", "creationTimestamp": "2024-05-02T10:00:00Z" },
      "spec": { "source": { "persistentVolumeClaimName": "dv-web-root" } },
      "status": { "readyToUse": false, "error": { "message": "quota exceeded" } }
    },
    {
      "metadata": { "name": "snap-orphan", "creationTimestamp": "2024-05-03T10:00:00Z" },
      "spec": { "source": { "persistentVolumeClaimName": "dv-gone" } },
      "status": { "readyToUse": true }
    }
  ]
}"##;
