//! Link-level helpers for integration tests.
//!
//! Wraps a transport so tests can assert on raw traffic, and builds radios
//! wired to the simulated controller.

use rfctl::adapters::sim::{SimHandle, SimTransceiver};
use rfctl::rpc::Transport;
use rfctl::{RadioConfig, RadioCtrl, RpcClient};

pub const TOKEN: &str = "session-0001";

// ── RecordingTransport ────────────────────────────────────────

/// Counts traffic passing through an inner transport.
pub struct RecordingTransport<X> {
    inner: X,
    pub bytes_written: usize,
    pub writes: usize,
    pub reads: usize,
}

#[allow(dead_code)]
impl<X: Transport> RecordingTransport<X> {
    pub fn new(inner: X) -> Self {
        Self {
            inner,
            bytes_written: 0,
            writes: 0,
            reads: 0,
        }
    }

    pub fn untouched(&self) -> bool {
        self.writes == 0 && self.reads == 0
    }
}

impl<X: Transport> Transport for RecordingTransport<X> {
    type Error = X::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, X::Error> {
        self.reads += 1;
        self.inner.read(buf)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, X::Error> {
        self.writes += 1;
        let n = self.inner.write(data)?;
        self.bytes_written += n;
        Ok(n)
    }

    fn flush(&mut self) -> Result<(), X::Error> {
        self.inner.flush()
    }
}

// ── Radio builders ────────────────────────────────────────────

pub type SimRadio = RadioCtrl<RecordingTransport<SimTransceiver>>;

/// Radio on a fresh simulated controller, no session attached yet.
pub fn radio_without_session(config: RadioConfig, block_index: usize) -> (SimRadio, SimHandle) {
    let sim = SimHandle::new(TOKEN);
    let rpc = RpcClient::new(RecordingTransport::new(sim.transport()));
    let radio = RadioCtrl::new(config, block_index, rpc).expect("radio construction");
    (radio, sim)
}

/// Radio with the session token attached, defaults not yet pushed.
#[allow(dead_code)]
pub fn radio_with_session(config: RadioConfig, block_index: usize) -> (SimRadio, SimHandle) {
    let (mut radio, sim) = radio_without_session(config, block_index);
    radio.attach_session(TOKEN);
    (radio, sim)
}

/// Two RX and two TX channels sharing one LO per direction.
#[allow(dead_code)]
pub fn dual_channel() -> RadioConfig {
    RadioConfig {
        num_rx_chans: 2,
        num_tx_chans: 2,
        ..RadioConfig::default()
    }
}
