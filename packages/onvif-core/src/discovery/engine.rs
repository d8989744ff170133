//! Multicast discovery across one or more interfaces.
//!
//! A call runs four phases:
//!
//! 1. **Select** - resolve the selector, or take every up + multicast
//!    interface (failing fast if there are none)
//! 2. **Probe** - open a socket per interface and send one Probe; bind or
//!    send failures are recorded and the interface is dropped
//! 3. **Collect** - every surviving interface listens for the whole timeout
//! 4. **Merge** - replies are keyed by endpoint reference, first seen wins
//!
//! Interface tasks are plain futures joined inside the call, so cancelling
//! the token or dropping the future closes every socket.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::interfaces::{self, InterfaceProvider, InterfaceResult, NetworkInterface, SystemInterfaces};
use super::probe::{build_probe, new_message_id, parse_probe_matches};
use super::socket::{MulticastSocketFactory, ProbeSocket, ProbeSocketFactory};
use super::types::{
    Device, DiscoverOptions, DiscoveryConfig, DiscoveryError, DiscoveryReport, DiscoveryResult,
    InterfaceFailure, ProbeFailureKind,
};
use crate::protocol_constants::DISCOVERY_RECV_BUFFER;

type Collected = Mutex<HashMap<String, Device>>;

/// Consecutive receive errors after which an interface stops listening.
const MAX_RECV_ERRORS: u32 = 8;

/// Deadline used when `now + timeout` is not representable.
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

/// WS-Discovery client.
///
/// Holds no state between calls; interfaces are re-read every time.
#[derive(Clone)]
pub struct Discoverer {
    interfaces: Arc<dyn InterfaceProvider>,
    sockets: Arc<dyn ProbeSocketFactory>,
}

impl Default for Discoverer {
    fn default() -> Self {
        Self::new(Arc::new(SystemInterfaces), Arc::new(MulticastSocketFactory::default()))
    }
}

impl Discoverer {
    pub fn new(interfaces: Arc<dyn InterfaceProvider>, sockets: Arc<dyn ProbeSocketFactory>) -> Self {
        Self { interfaces, sockets }
    }

    /// Every host interface, usable or not.
    #[must_use]
    pub fn list_interfaces(&self) -> Vec<NetworkInterface> {
        self.interfaces.interfaces()
    }

    /// See [`interfaces::resolve`].
    pub fn resolve_interface(&self, selector: &str) -> InterfaceResult<NetworkInterface> {
        interfaces::resolve(self.interfaces.as_ref(), selector)
    }

    /// Probes and returns the devices found within `timeout`.
    ///
    /// An empty list is a normal outcome.
    ///
    /// # Errors
    /// See [`discover_with_report`](Self::discover_with_report).
    pub async fn discover(
        &self,
        cancel: &CancellationToken,
        timeout: Duration,
        options: &DiscoverOptions,
    ) -> DiscoveryResult<Vec<Device>> {
        Ok(self.discover_with_report(cancel, timeout, options).await?.devices)
    }

    /// [`discover`](Self::discover) driven by a [`DiscoveryConfig`].
    ///
    /// # Errors
    /// See [`discover_with_report`](Self::discover_with_report).
    pub async fn discover_with_config(
        &self,
        cancel: &CancellationToken,
        config: &DiscoveryConfig,
    ) -> DiscoveryResult<DiscoveryReport> {
        self.discover_with_report(cancel, config.timeout, &config.options())
            .await
    }

    /// Like [`discover`](Self::discover), also reporting interfaces that
    /// could not be probed.
    ///
    /// Cancelling `cancel` ends collection early; devices seen so far are
    /// still returned. A token that is already cancelled returns an empty
    /// report without opening any socket. A `timeout` too large to add to
    /// the current time collects until cancelled.
    ///
    /// # Errors
    /// - [`DiscoveryError::Interface`] if the selector does not resolve
    /// - [`DiscoveryError::NoInterfaces`] if no interface is usable
    /// - [`DiscoveryError::AllInterfacesFailed`] if no Probe could be sent
    pub async fn discover_with_report(
        &self,
        cancel: &CancellationToken,
        timeout: Duration,
        options: &DiscoverOptions,
    ) -> DiscoveryResult<DiscoveryReport> {
        let selected = self.select(options)?;
        if cancel.is_cancelled() {
            log::debug!("[WS-Discovery] Cancelled before probing");
            return Ok(DiscoveryReport::default());
        }

        let message_id = new_message_id();
        let probe = build_probe(&message_id).map_err(|e| DiscoveryError::Probe(e.to_string()))?;
        let now = Instant::now();
        let deadline = now.checked_add(timeout).unwrap_or(now + FAR_FUTURE);

        let mut failures = Vec::new();
        let mut active = Vec::new();
        for iface in &selected {
            match self.sockets.open(iface) {
                Ok(socket) => active.push((iface.name.clone(), socket)),
                Err(kind) => failures.push(soft_failure(&iface.name, kind)),
            }
        }

        log::debug!(
            "[WS-Discovery] Probing {} of {} interface(s) for {:?} ({})",
            active.len(),
            selected.len(),
            timeout,
            message_id
        );

        let collected: Collected = Mutex::new(HashMap::new());
        let results = join_all(active.iter().map(|(name, socket)| {
            probe_interface(
                name,
                &**socket,
                probe.as_bytes(),
                &message_id,
                deadline,
                cancel,
                &collected,
            )
        }))
        .await;
        // Sockets close here, before merging.
        drop(active);

        failures.extend(results.into_iter().filter_map(Result::err));
        if failures.len() == selected.len() {
            return Err(DiscoveryError::AllInterfacesFailed(failures));
        }

        let mut devices: Vec<Device> = collected.into_inner().into_values().collect();
        devices.sort_by(|a, b| a.endpoint_reference.cmp(&b.endpoint_reference));

        log::debug!(
            "[WS-Discovery] Found {} device(s), {} interface failure(s)",
            devices.len(),
            failures.len()
        );

        Ok(DiscoveryReport { devices, failures })
    }

    fn select(&self, options: &DiscoverOptions) -> DiscoveryResult<Vec<NetworkInterface>> {
        if let Some(selector) = options.interface.as_deref().filter(|s| !s.is_empty()) {
            return Ok(vec![self.resolve_interface(selector)?]);
        }

        let usable: Vec<_> = self
            .interfaces
            .interfaces()
            .into_iter()
            .filter(NetworkInterface::is_usable)
            .collect();

        if usable.is_empty() {
            return Err(DiscoveryError::NoInterfaces);
        }
        Ok(usable)
    }
}

fn soft_failure(interface: &str, kind: ProbeFailureKind) -> InterfaceFailure {
    log::warn!("[WS-Discovery] Skipping {}: {}", interface, kind);
    InterfaceFailure {
        interface: interface.to_string(),
        kind,
    }
}

/// Sends one Probe on `socket`, then collects replies until `deadline` or
/// cancellation.
async fn probe_interface(
    name: &str,
    socket: &dyn ProbeSocket,
    probe: &[u8],
    message_id: &str,
    deadline: Instant,
    cancel: &CancellationToken,
    collected: &Collected,
) -> Result<(), InterfaceFailure> {
    if let Err(e) = socket.send_probe(probe).await {
        return Err(soft_failure(name, ProbeFailureKind::Send(e.to_string())));
    }
    log::trace!("[WS-Discovery] Probe sent on {}", name);

    let mut buf = vec![0u8; DISCOVERY_RECV_BUFFER];
    let mut recv_errors = 0u32;
    let sleep = tokio::time::sleep_until(deadline);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log::debug!("[WS-Discovery] Collection on {} cancelled", name);
                break;
            }
            _ = &mut sleep => break,
            received = socket.recv(&mut buf) => match received {
                Ok((len, src)) => {
                    recv_errors = 0;
                    let devices = parse_probe_matches(&buf[..len], Some(message_id));
                    log::trace!("[WS-Discovery] {} match(es) from {} on {}", devices.len(), src, name);
                    if devices.is_empty() {
                        continue;
                    }
                    let mut map = collected.lock().await;
                    for device in devices {
                        map.entry(device.endpoint_reference.clone()).or_insert(device);
                    }
                }
                Err(e) => {
                    // ICMP errors from earlier sends surface here on some
                    // platforms; the socket usually stays usable.
                    recv_errors += 1;
                    log::debug!("[WS-Discovery] Receive error on {}: {}", name, e);
                    if recv_errors >= MAX_RECV_ERRORS {
                        log::warn!(
                            "[WS-Discovery] Giving up on {} after {} receive errors: {}",
                            name,
                            recv_errors,
                            e
                        );
                        break;
                    }
                }
            },
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;
    use std::net::SocketAddr;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::discovery::interfaces::tests::{iface, StaticInterfaces};
    use crate::discovery::probe::tests::probe_matches;
    use crate::xml::extract_xml_text;

    /// How a fake interface behaves.
    #[derive(Clone)]
    enum Behaviour {
        FailOpen,
        FailSend,
        /// Every receive fails immediately.
        FailRecv,
        /// Replies delivered in order; `{probe}` is replaced with the
        /// Probe's MessageID.
        Replies(Vec<String>),
    }

    struct FakeSockets {
        behaviours: HashMap<String, Behaviour>,
        opened: AtomicUsize,
        recv_calls: Arc<AtomicUsize>,
    }

    impl FakeSockets {
        fn new(behaviours: &[(&str, Behaviour)]) -> Arc<Self> {
            Arc::new(Self {
                behaviours: behaviours
                    .iter()
                    .map(|(name, b)| (name.to_string(), b.clone()))
                    .collect(),
                opened: AtomicUsize::new(0),
                recv_calls: Arc::new(AtomicUsize::new(0)),
            })
        }

        fn socket(&self, replies: Vec<String>, fail_send: bool, fail_recv: bool) -> Box<dyn ProbeSocket> {
            Box::new(FakeSocket {
                replies: parking_lot::Mutex::new(replies.into()),
                message_id: parking_lot::Mutex::new(String::new()),
                fail_send,
                fail_recv,
                recv_calls: Arc::clone(&self.recv_calls),
            })
        }
    }

    impl ProbeSocketFactory for FakeSockets {
        fn open(&self, iface: &NetworkInterface) -> Result<Box<dyn ProbeSocket>, ProbeFailureKind> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            match self.behaviours.get(&iface.name) {
                Some(Behaviour::FailOpen) => Err(ProbeFailureKind::SocketBind("address in use".into())),
                Some(Behaviour::FailSend) => Ok(self.socket(Vec::new(), true, false)),
                Some(Behaviour::FailRecv) => Ok(self.socket(Vec::new(), false, true)),
                Some(Behaviour::Replies(replies)) => Ok(self.socket(replies.clone(), false, false)),
                None => Ok(self.socket(Vec::new(), false, false)),
            }
        }
    }

    struct FakeSocket {
        replies: parking_lot::Mutex<VecDeque<String>>,
        message_id: parking_lot::Mutex<String>,
        fail_send: bool,
        fail_recv: bool,
        recv_calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ProbeSocket for FakeSocket {
        async fn send_probe(&self, payload: &[u8]) -> io::Result<()> {
            if self.fail_send {
                return Err(io::Error::new(io::ErrorKind::NetworkUnreachable, "network unreachable"));
            }
            let xml = String::from_utf8_lossy(payload);
            *self.message_id.lock() = extract_xml_text(&xml, "MessageID").unwrap_or_default();
            Ok(())
        }

        async fn recv(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
            self.recv_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_recv {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"));
            }
            let next = self.replies.lock().pop_front();
            match next {
                Some(reply) => {
                    let reply = reply.replace("{probe}", &self.message_id.lock());
                    buf[..reply.len()].copy_from_slice(reply.as_bytes());
                    Ok((reply.len(), SocketAddr::from(([192, 0, 2, 1], 3702))))
                }
                None => std::future::pending().await,
            }
        }
    }

    fn reply(matches: &[(&str, &str)]) -> String {
        probe_matches("{probe}", matches)
    }

    fn two_interfaces() -> Arc<StaticInterfaces> {
        Arc::new(StaticInterfaces(vec![
            iface("eth0", &["192.168.1.20"], true, true),
            iface("eth1", &["10.0.0.20"], true, true),
        ]))
    }

    fn endpoints(devices: &[Device]) -> Vec<&str> {
        devices.iter().map(|d| d.endpoint_reference.as_str()).collect()
    }

    const WINDOW: Duration = Duration::from_secs(2);

    #[tokio::test(start_paused = true)]
    async fn merges_replies_across_interfaces_by_endpoint_reference() {
        let sockets = FakeSockets::new(&[
            (
                "eth0",
                Behaviour::Replies(vec![reply(&[("urn:uuid:x", "http://192.168.1.5/"), ("urn:uuid:y", "http://192.168.1.6/")])]),
            ),
            (
                "eth1",
                Behaviour::Replies(vec![reply(&[("urn:uuid:y", "http://10.0.0.6/"), ("urn:uuid:z", "http://10.0.0.7/")])]),
            ),
        ]);
        let discoverer = Discoverer::new(two_interfaces(), sockets);

        let devices = discoverer
            .discover(&CancellationToken::new(), WINDOW, &DiscoverOptions::default())
            .await
            .unwrap();

        assert_eq!(endpoints(&devices), vec!["urn:uuid:x", "urn:uuid:y", "urn:uuid:z"]);
    }

    #[tokio::test(start_paused = true)]
    async fn first_seen_record_wins() {
        let sockets = FakeSockets::new(&[(
            "eth0",
            Behaviour::Replies(vec![
                reply(&[("urn:uuid:x", "http://192.168.1.5/first")]),
                reply(&[("urn:uuid:x", "http://192.168.1.5/second")]),
            ]),
        )]);
        let interfaces = Arc::new(StaticInterfaces(vec![iface("eth0", &["192.168.1.20"], true, true)]));
        let discoverer = Discoverer::new(interfaces, sockets);

        let devices = discoverer
            .discover(&CancellationToken::new(), WINDOW, &DiscoverOptions::default())
            .await
            .unwrap();

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].xaddrs, vec!["http://192.168.1.5/first"]);
    }

    #[tokio::test(start_paused = true)]
    async fn stray_and_malformed_replies_are_ignored() {
        let sockets = FakeSockets::new(&[(
            "eth0",
            Behaviour::Replies(vec![
                probe_matches("urn:uuid:other-probe", &[("urn:uuid:stray", "http://192.168.1.9/")]),
                "not xml at all".to_string(),
                reply(&[("urn:uuid:x", "http://192.168.1.5/")]),
            ]),
        )]);
        let interfaces = Arc::new(StaticInterfaces(vec![iface("eth0", &["192.168.1.20"], true, true)]));
        let discoverer = Discoverer::new(interfaces, sockets);

        let devices = discoverer
            .discover(&CancellationToken::new(), WINDOW, &DiscoverOptions::default())
            .await
            .unwrap();

        assert_eq!(endpoints(&devices), vec!["urn:uuid:x"]);
    }

    #[tokio::test(start_paused = true)]
    async fn one_bind_failure_is_soft() {
        let sockets = FakeSockets::new(&[
            ("eth0", Behaviour::FailOpen),
            ("eth1", Behaviour::Replies(vec![reply(&[("urn:uuid:z", "http://10.0.0.7/")])])),
        ]);
        let discoverer = Discoverer::new(two_interfaces(), sockets);

        let report = discoverer
            .discover_with_report(&CancellationToken::new(), WINDOW, &DiscoverOptions::default())
            .await
            .unwrap();

        assert_eq!(endpoints(&report.devices), vec!["urn:uuid:z"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].interface, "eth0");
    }

    #[tokio::test(start_paused = true)]
    async fn every_interface_failing_is_an_error() {
        let sockets = FakeSockets::new(&[("eth0", Behaviour::FailOpen), ("eth1", Behaviour::FailSend)]);
        let discoverer = Discoverer::new(two_interfaces(), sockets);

        let err = discoverer
            .discover(&CancellationToken::new(), WINDOW, &DiscoverOptions::default())
            .await
            .unwrap_err();

        match err {
            DiscoveryError::AllInterfacesFailed(failures) => {
                let mut names: Vec<_> = failures.iter().map(|f| f.interface.as_str()).collect();
                names.sort_unstable();
                assert_eq!(names, vec!["eth0", "eth1"]);
                assert!(failures.iter().any(|f| matches!(f.kind, ProbeFailureKind::Send(_))));
            }
            other => panic!("expected AllInterfacesFailed, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn silent_network_is_empty_success() {
        let sockets = FakeSockets::new(&[]);
        let discoverer = Discoverer::new(two_interfaces(), sockets);

        let report = discoverer
            .discover_with_report(&CancellationToken::new(), WINDOW, &DiscoverOptions::default())
            .await
            .unwrap();

        assert!(report.devices.is_empty());
        assert!(report.failures.is_empty());
    }

    #[tokio::test]
    async fn no_usable_interface_fails_before_opening_sockets() {
        let interfaces = Arc::new(StaticInterfaces(vec![
            iface("lo", &["127.0.0.1"], true, false),
            iface("eth0", &["192.168.1.20"], false, true),
        ]));
        let sockets = FakeSockets::new(&[]);
        let discoverer = Discoverer::new(interfaces, sockets.clone());

        let err = discoverer
            .discover(&CancellationToken::new(), WINDOW, &DiscoverOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DiscoveryError::NoInterfaces));
        assert_eq!(sockets.opened.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn selector_limits_probe_to_one_interface() {
        let sockets = FakeSockets::new(&[
            ("eth0", Behaviour::Replies(vec![reply(&[("urn:uuid:x", "http://192.168.1.5/")])])),
            ("eth1", Behaviour::Replies(vec![reply(&[("urn:uuid:z", "http://10.0.0.7/")])])),
        ]);
        let discoverer = Discoverer::new(two_interfaces(), sockets.clone());

        let devices = discoverer
            .discover(&CancellationToken::new(), WINDOW, &DiscoverOptions::on_interface("10.0.0.20"))
            .await
            .unwrap();

        assert_eq!(endpoints(&devices), vec!["urn:uuid:z"]);
        assert_eq!(sockets.opened.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_selector_lists_interfaces() {
        let sockets = FakeSockets::new(&[]);
        let discoverer = Discoverer::new(two_interfaces(), sockets.clone());

        let err = discoverer
            .discover(&CancellationToken::new(), WINDOW, &DiscoverOptions::on_interface("eth9"))
            .await
            .unwrap_err();

        assert!(matches!(err, DiscoveryError::Interface(_)));
        let msg = err.to_string();
        assert!(msg.contains("eth0") && msg.contains("eth1"), "{msg}");
        assert_eq!(sockets.opened.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn cancellation_ends_collection_early() {
        let sockets = FakeSockets::new(&[(
            "eth0",
            Behaviour::Replies(vec![reply(&[("urn:uuid:x", "http://192.168.1.5/")])]),
        )]);
        let discoverer = Discoverer::new(two_interfaces(), sockets);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let started = Instant::now();
        let devices = discoverer
            .discover(&cancel, Duration::from_secs(600), &DiscoverOptions::default())
            .await
            .unwrap();

        assert!(started.elapsed() < Duration::from_secs(1));
        assert_eq!(endpoints(&devices), vec!["urn:uuid:x"]);
    }

    #[tokio::test(start_paused = true)]
    async fn unbounded_timeout_collects_until_cancelled() {
        let sockets = FakeSockets::new(&[(
            "eth0",
            Behaviour::Replies(vec![reply(&[("urn:uuid:x", "http://192.168.1.5/")])]),
        )]);
        let interfaces = Arc::new(StaticInterfaces(vec![iface("eth0", &["192.168.1.20"], true, true)]));
        let discoverer = Discoverer::new(interfaces, sockets);
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            trigger.cancel();
        });

        let devices = discoverer
            .discover(&cancel, Duration::MAX, &DiscoverOptions::default())
            .await
            .unwrap();

        assert_eq!(endpoints(&devices), vec!["urn:uuid:x"]);
    }

    #[tokio::test]
    async fn already_cancelled_token_opens_no_sockets() {
        let sockets = FakeSockets::new(&[]);
        let discoverer = Discoverer::new(two_interfaces(), sockets.clone());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let report = discoverer
            .discover_with_report(&cancel, Duration::MAX, &DiscoverOptions::default())
            .await
            .unwrap();

        assert!(report.devices.is_empty());
        assert!(report.failures.is_empty());
        assert_eq!(sockets.opened.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn already_cancelled_token_still_reports_bad_selector() {
        let discoverer = Discoverer::new(two_interfaces(), FakeSockets::new(&[]));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = discoverer
            .discover(&cancel, WINDOW, &DiscoverOptions::on_interface("eth9"))
            .await
            .unwrap_err();

        assert!(matches!(err, DiscoveryError::Interface(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn repeated_receive_errors_stop_listening() {
        let sockets = FakeSockets::new(&[
            ("eth0", Behaviour::FailRecv),
            ("eth1", Behaviour::Replies(vec![reply(&[("urn:uuid:z", "http://10.0.0.7/")])])),
        ]);
        let discoverer = Discoverer::new(two_interfaces(), sockets.clone());

        let report = discoverer
            .discover_with_report(&CancellationToken::new(), WINDOW, &DiscoverOptions::default())
            .await
            .unwrap();

        assert_eq!(endpoints(&report.devices), vec!["urn:uuid:z"]);
        assert!(report.failures.is_empty());
        // eth0 gives up after the error limit; eth1 reads one reply and then
        // waits out the window on a pending receive.
        assert_eq!(sockets.recv_calls.load(Ordering::SeqCst), MAX_RECV_ERRORS as usize + 2);
    }

    #[tokio::test]
    async fn discovers_over_loopback_udp() {
        let responder = tokio::net::UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let target = responder.local_addr().unwrap();
        tokio::spawn(async move {
            let mut buf = vec![0u8; DISCOVERY_RECV_BUFFER];
            let (len, from) = responder.recv_from(&mut buf).await.unwrap();
            let probe = String::from_utf8_lossy(&buf[..len]).to_string();
            let id = extract_xml_text(&probe, "MessageID").unwrap();
            let answer = probe_matches(&id, &[("urn:uuid:loop", "http://127.0.0.1/onvif/device_service")]);
            responder.send_to(answer.as_bytes(), from).await.unwrap();
        });

        let interfaces = Arc::new(StaticInterfaces(vec![iface("lo", &["127.0.0.1"], true, true)]));
        let discoverer = Discoverer::new(interfaces, Arc::new(MulticastSocketFactory::with_target(target)));

        let devices = discoverer
            .discover(&CancellationToken::new(), Duration::from_millis(500), &DiscoverOptions::default())
            .await
            .unwrap();

        assert_eq!(endpoints(&devices), vec!["urn:uuid:loop"]);
        assert_eq!(devices[0].name.as_deref(), Some("Front Door"));
    }
}
