//! Rendering a [`Configuration`] into RxTxApp's JSON config format
//!
//! Layout produced:
//! - `interfaces`: every NIC port used by any session, first-seen order
//! - `tx_sessions` / `rx_sessions`: one group per (mode, tx port, rx port),
//!   each holding `video` and `st30p` arrays

use std::net::Ipv4Addr;

use serde_json::{json, Map, Value};

use super::builder::Configuration;
use super::descriptor::{Session, St30pSession, VideoSession};
use super::format::TestMode;
use crate::common::config::NetworkConfig;
use crate::common::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GroupKey {
    mode: TestMode,
    tx_if: usize,
    rx_if: usize,
}

#[derive(Debug, Default)]
struct Group {
    tx_video: Vec<Value>,
    tx_st30p: Vec<Value>,
    rx_video: Vec<Value>,
    rx_st30p: Vec<Value>,
}

impl Configuration {
    /// Render this configuration as the JSON document RxTxApp loads with
    /// `--config_file`
    pub fn render(&self, network: &NetworkConfig) -> Result<Value> {
        if self.is_empty() {
            return Err(Error::EmptyConfiguration);
        }

        for session in self.sessions() {
            Session::check_ports(session.nic_port_list())?;
        }

        let mut interfaces: Vec<String> = Vec::new();
        let mut groups: Vec<(GroupKey, Group)> = Vec::new();
        let mut video_idx: u16 = 0;
        let mut audio_idx: u16 = 0;

        for sessions in self.session_groups() {
            let ports = sessions[0].nic_port_list();
            let key = GroupKey {
                mode: sessions[0].test_mode(),
                tx_if: interface_index(&mut interfaces, &ports[0]),
                rx_if: interface_index(&mut interfaces, &ports[1]),
            };
            let mut group = Group::default();

            for session in sessions {
                match session {
                    Session::Video(video) => {
                        let port = session_port(network.video_start_port, video_idx)?;
                        group.tx_video.push(tx_video_entry(video, port, network));
                        group.rx_video.push(rx_video_entry(video, port, network));
                        video_idx += 1;
                    }
                    Session::St30p(audio) => {
                        let port = session_port(network.audio_start_port, audio_idx)?;
                        group.tx_st30p.push(st30p_entry(audio, port, network));
                        group.rx_st30p.push(st30p_entry(audio, port, network));
                        audio_idx += 1;
                    }
                }
            }
            groups.push((key, group));
        }

        let interface_ips = interfaces
            .iter()
            .enumerate()
            .map(|(i, _)| interface_ip(network, i))
            .collect::<Result<Vec<_>>>()?;

        let mut tx_sessions = Vec::new();
        let mut rx_sessions = Vec::new();
        for (key, group) in groups {
            let (dip, rx_ip) = match key.mode {
                TestMode::Multicast => (network.multicast_ip, network.multicast_ip),
                TestMode::Unicast => (interface_ips[key.rx_if], interface_ips[key.tx_if]),
            };

            let mut tx = Map::new();
            tx.insert("dip".into(), json!([dip.to_string()]));
            tx.insert("interface".into(), json!([key.tx_if]));
            insert_non_empty(&mut tx, "video", group.tx_video);
            insert_non_empty(&mut tx, "st30p", group.tx_st30p);
            tx_sessions.push(Value::Object(tx));

            let mut rx = Map::new();
            rx.insert("ip".into(), json!([rx_ip.to_string()]));
            rx.insert("interface".into(), json!([key.rx_if]));
            insert_non_empty(&mut rx, "video", group.rx_video);
            insert_non_empty(&mut rx, "st30p", group.rx_st30p);
            rx_sessions.push(Value::Object(rx));
        }

        let interfaces: Vec<Value> = interfaces
            .iter()
            .zip(&interface_ips)
            .map(|(name, ip)| json!({ "name": name, "ip": ip.to_string() }))
            .collect();

        Ok(json!({
            "interfaces": interfaces,
            "tx_sessions": tx_sessions,
            "rx_sessions": rx_sessions,
        }))
    }

    /// Sessions in the order RxTxApp numbers them
    ///
    /// RxTxApp counts sessions of each kind across the rendered groups, so
    /// `app_rx_video_result(n)` refers to the n-th video session of this
    /// list, not the n-th one added.
    pub fn rxtxapp_order(&self) -> Vec<&Session> {
        self.session_groups().into_iter().flatten().collect()
    }

    /// One group per (mode, tx port, rx port), groups and members in
    /// first-seen order
    fn session_groups(&self) -> Vec<Vec<&Session>> {
        let mut groups: Vec<Vec<&Session>> = Vec::new();
        for session in self.sessions() {
            match groups.iter_mut().find(|g| same_group(g[0], session)) {
                Some(group) => group.push(session),
                None => groups.push(vec![session]),
            }
        }
        groups
    }

    /// Render as pretty-printed JSON text
    pub fn to_json_string(&self, network: &NetworkConfig) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.render(network)?)?)
    }
}

fn same_group(a: &Session, b: &Session) -> bool {
    a.test_mode() == b.test_mode() && a.nic_port_list().get(..2) == b.nic_port_list().get(..2)
}

fn interface_index(interfaces: &mut Vec<String>, port: &str) -> usize {
    match interfaces.iter().position(|p| p == port) {
        Some(i) => i,
        None => {
            interfaces.push(port.to_string());
            interfaces.len() - 1
        }
    }
}

/// IP of the interface at `index`: tx_ip, rx_ip, then rx_ip + 1, + 2, ...
fn interface_ip(network: &NetworkConfig, index: usize) -> Result<Ipv4Addr> {
    match index {
        0 => Ok(network.tx_ip),
        1 => Ok(network.rx_ip),
        n => {
            let base = u32::from(network.rx_ip);
            let offset = u32::try_from(n - 1)
                .map_err(|_| Error::Config(format!("too many interfaces ({})", n + 1)))?;
            base.checked_add(offset)
                .map(Ipv4Addr::from)
                .ok_or_else(|| Error::Config(format!("no IP left for interface {}", n)))
        }
    }
}

fn session_port(base: u16, index: u16) -> Result<u16> {
    index
        .checked_mul(2)
        .and_then(|off| base.checked_add(off))
        .ok_or_else(|| Error::Config(format!("UDP port overflow for session {} from {}", index, base)))
}

fn insert_non_empty(map: &mut Map<String, Value>, key: &str, entries: Vec<Value>) {
    if !entries.is_empty() {
        map.insert(key.to_string(), Value::Array(entries));
    }
}

fn tx_video_entry(video: &VideoSession, port: u16, network: &NetworkConfig) -> Value {
    json!({
        "replicas": 1,
        "type": video.transport.as_str(),
        "pacing": "gap",
        "packing": "BPM",
        "start_port": port,
        "payload_type": network.video_payload_type,
        "tr_offset": "default",
        "video_format": video.video_format.to_string(),
        "pg_format": video.pg_format.as_str(),
        "video_url": video.video_url.display().to_string(),
    })
}

fn rx_video_entry(video: &VideoSession, port: u16, network: &NetworkConfig) -> Value {
    json!({
        "replicas": 1,
        "type": video.transport.as_str(),
        "pacing": "gap",
        "start_port": port,
        "payload_type": network.video_payload_type,
        "tr_offset": "default",
        "video_format": video.video_format.to_string(),
        "pg_format": video.pg_format.as_str(),
        "display": false,
        "measure_latency": false,
    })
}

fn st30p_entry(audio: &St30pSession, port: u16, network: &NetworkConfig) -> Value {
    let channels: Vec<String> = audio.audio_channel.iter().map(ToString::to_string).collect();
    json!({
        "replicas": 1,
        "start_port": port,
        "payload_type": network.audio_payload_type,
        "audio_format": audio.audio_format.as_str(),
        "audio_channel": channels,
        "audio_sampling": audio.audio_sampling.as_str(),
        "audio_ptime": audio.audio_ptime.as_str(),
        "audio_url": audio.filename.display().to_string(),
    })
}
