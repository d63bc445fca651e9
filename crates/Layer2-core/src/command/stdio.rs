//! Stdio - 런타임 출력 스트림
//!
//! 바이너리는 프로세스 stdout/stderr를, 테스트는 메모리 버퍼를 주입합니다.

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// stdout / stderr 쌍
#[derive(Clone)]
pub struct Stdio {
    out: SharedWriter,
    err: SharedWriter,
}

impl std::fmt::Debug for Stdio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stdio").finish_non_exhaustive()
    }
}

impl Stdio {
    pub fn new(out: impl Write + Send + 'static, err: impl Write + Send + 'static) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(out))),
            err: Arc::new(Mutex::new(Box::new(err))),
        }
    }

    /// 프로세스 표준 스트림
    pub fn inherit() -> Self {
        Self::new(io::stdout(), io::stderr())
    }

    /// 메모리 캡처 (stdout, stderr 버퍼 반환)
    pub fn captured() -> (Self, CaptureBuffer, CaptureBuffer) {
        let out = CaptureBuffer::default();
        let err = CaptureBuffer::default();
        (Self::new(out.clone(), err.clone()), out, err)
    }

    pub fn write_out(&self, text: &str) -> io::Result<()> {
        write_locked(&self.out, text)
    }

    pub fn write_err(&self, text: &str) -> io::Result<()> {
        write_locked(&self.err, text)
    }
}

fn write_locked(writer: &SharedWriter, text: &str) -> io::Result<()> {
    let mut guard = writer.lock();
    guard.write_all(text.as_bytes())?;
    guard.flush()
}

/// 공유 메모리 버퍼
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer(Arc<Mutex<Vec<u8>>>);

impl CaptureBuffer {
    /// 지금까지 기록된 내용 (UTF-8 손실 변환)
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    pub fn is_empty(&self) -> bool {
        self.0.lock().is_empty()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
