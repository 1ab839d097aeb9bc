//! Wire interface to the external hand tracker. The tracker process owns
//! the camera and the pose model; this side owns a listening socket, a
//! one-line JSON handshake forwarding the tracking knobs, and the decoding
//! of newline-delimited result payloads into control-signal updates.

use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::thread::{self, JoinHandle};

use crossbeam_channel::Sender;
use serde::{Deserialize, Serialize};

use crate::error::VisError;
use crate::interpreter::LandmarkInterpreter;
use crate::signals::ControlSignals;

/// One normalized landmark in [0,1]x[0,1] image space; z is the tracker's
/// relative depth estimate and unused here.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

/// One tracker callback payload: zero or more hands of 21 landmarks each.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseResult {
    #[serde(default)]
    pub multi_hand_landmarks: Vec<Vec<Landmark>>,
}

/// Knobs forwarded to the tracker on connect.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleConfig {
    pub max_num_hands: u32,
    pub model_complexity: u32,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            max_num_hands: 2,
            model_complexity: 1,
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.7,
        }
    }
}

/// Accepts tracker connections and turns their result stream into
/// `ControlSignals` messages. Bound eagerly so a bad address fails
/// startup; everything after `spawn` is best-effort.
pub struct PoseFeed {
    listener: TcpListener,
    handshake: String,
}

impl PoseFeed {
    pub fn bind(addr: &str, config: &OracleConfig) -> Result<Self, VisError> {
        let handshake = serde_json::to_string(config)?;
        let listener = TcpListener::bind(addr).map_err(|e| {
            VisError::new("tracker-bind")
                .with_arg("addr", addr)
                .push_std(e)
        })?;
        let feed = Self { listener, handshake };
        log::info!("listening for tracker connections on {}", feed.local_addr()?);
        Ok(feed)
    }

    pub fn local_addr(&self) -> Result<SocketAddr, VisError> {
        Ok(self.listener.local_addr()?)
    }

    /// Moves the accept loop onto a worker thread. One interpreter serves
    /// the whole feed so signal retention survives tracker reconnects.
    /// The loop ends when the receiving side of `tx` hangs up.
    pub fn spawn(self, tx: Sender<ControlSignals>) -> JoinHandle<()> {
        thread::spawn(move || {
            let mut interpreter = LandmarkInterpreter::new();
            for stream in self.listener.incoming() {
                let stream = match stream {
                    Ok(stream) => stream,
                    Err(e) => {
                        log::warn!("tracker accept failed: {e}");
                        continue;
                    }
                };
                if !serve_connection(stream, &self.handshake, &mut interpreter, &tx) {
                    return;
                }
            }
        })
    }
}

/// Drives one tracker connection to completion. Returns false only when
/// the signal receiver is gone and the feed should shut down.
fn serve_connection(
    mut stream: TcpStream,
    handshake: &str,
    interpreter: &mut LandmarkInterpreter,
    tx: &Sender<ControlSignals>,
) -> bool {
    let peer = stream
        .peer_addr()
        .map(|a| a.to_string())
        .unwrap_or_else(|_| "<unknown>".to_string());
    log::info!("tracker connected from {peer}");

    if let Err(e) = writeln!(stream, "{handshake}") {
        log::warn!("tracker handshake to {peer} failed: {e}");
        return true;
    }

    let reader = BufReader::new(stream);
    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::info!("tracker {peer} dropped: {e}");
                return true;
            }
        };
        if line.is_empty() {
            continue;
        }
        let result: PoseResult = match serde_json::from_str(&line) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("skipping malformed tracker payload: {e}");
                continue;
            }
        };
        let signals = interpreter.interpret(&result.multi_hand_landmarks);
        if tx.send(signals).is_err() {
            return false;
        }
    }
    log::info!("tracker {peer} disconnected");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufRead, BufReader, Write};
    use std::net::TcpStream;
    use std::time::Duration;

    #[test]
    fn decodes_a_tracker_payload() {
        let payload = r#"{"multiHandLandmarks":[[
            {"x":0.1,"y":0.2,"z":0.0},
            {"x":0.3,"y":0.4}
        ]]}"#;
        let result: PoseResult = serde_json::from_str(payload).unwrap();
        assert_eq!(result.multi_hand_landmarks.len(), 1);
        assert_eq!(result.multi_hand_landmarks[0][1].x, 0.3);
        assert_eq!(result.multi_hand_landmarks[0][1].z, 0.0);
    }

    #[test]
    fn empty_payload_decodes_to_no_hands() {
        let result: PoseResult = serde_json::from_str("{}").unwrap();
        assert!(result.multi_hand_landmarks.is_empty());
    }

    #[test]
    fn oracle_config_defaults_match_the_reference_tracker() {
        let config = OracleConfig::default();
        assert_eq!(config.max_num_hands, 2);
        assert_eq!(config.model_complexity, 1);
        assert_eq!(config.min_detection_confidence, 0.7);
        assert_eq!(config.min_tracking_confidence, 0.7);
    }

    #[test]
    fn handshake_uses_the_tracker_field_names() {
        let encoded = serde_json::to_string(&OracleConfig::default()).unwrap();
        assert!(encoded.contains("\"maxNumHands\":2"));
        assert!(encoded.contains("\"minDetectionConfidence\":0.7"));
    }

    #[test]
    fn feed_turns_payload_lines_into_signals() {
        let feed = PoseFeed::bind("127.0.0.1:0", &OracleConfig::default()).unwrap();
        let addr = feed.local_addr().unwrap();
        let (tx, rx) = crossbeam_channel::unbounded();
        let _feed = feed.spawn(tx);

        let mut stream = TcpStream::connect(addr).unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());
        let mut handshake = String::new();
        reader.read_line(&mut handshake).unwrap();
        assert!(handshake.contains("maxNumHands"));

        // Index fingertip at (1.0, 0.0), everything else at the origin.
        let mut points = vec![r#"{"x":0.0,"y":0.0}"#.to_string(); 21];
        points[8] = r#"{"x":1.0,"y":0.0}"#.to_string();
        writeln!(
            stream,
            r#"{{"multiHandLandmarks":[[{}]]}}"#,
            points.join(",")
        )
        .unwrap();

        let signals = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(signals.hand_offset.x, 15.0);
        assert_eq!(signals.hand_offset.y, 12.5);
    }
}
