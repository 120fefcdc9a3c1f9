// Snapshot builder: mandatory vs degraded sources, with fake metrics

mod common;

use arraymon::array::ArrayResolver;
use arraymon::array::probe::PathProber;
use arraymon::diagnostics::RecordingDiagnostics;
use arraymon::error::SnapshotError;
use arraymon::models::{ArrayState, Protection};
use arraymon::snapshot::{SnapshotBuilder, SnapshotConfig};
use common::{FakeMetrics, FixedUsage, make_dir, memory_stats, write_file};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

fn builder(
    root: &Path,
    metrics: FakeMetrics,
    usage: FixedUsage,
    diag: Arc<RecordingDiagnostics>,
) -> SnapshotBuilder {
    let prober = PathProber::new([root]);
    let resolver = ArrayResolver::new(prober.clone(), Arc::new(usage), 4);
    SnapshotBuilder::new(
        Arc::new(metrics),
        resolver,
        prober,
        diag,
        SnapshotConfig {
            cpu_sample: Duration::from_millis(10),
            ..SnapshotConfig::default()
        },
    )
}

#[test]
fn snapshot_merges_metrics_and_array() {
    let root = tempfile::TempDir::new().unwrap();
    write_file(root.path(), "sys/class/thermal/thermal_zone0/temp", "45000\n");
    let disk1 = make_dir(root.path(), "mnt/disk1");
    let disk2 = make_dir(root.path(), "mnt/disk2");
    let usage = FixedUsage::new()
        .with(disk1, 1000, 400)
        .with(disk2, 2000, 900);
    let diag = Arc::new(RecordingDiagnostics::new());

    let stats = builder(root.path(), FakeMetrics::default(), usage, diag.clone())
        .build()
        .unwrap();

    assert_eq!(stats.hostname, "os-host");
    assert_eq!(stats.cpu_usage, vec![12.5, 50.0]);
    assert_eq!(stats.cpu_temp, 45.0);
    assert_eq!(stats.cpu_cores, 2);
    assert_eq!(stats.load_average, vec![0.5, 0.25, 0.125]);
    assert_eq!(stats.memory_stats, memory_stats());
    assert_eq!(stats.network_stats.interfaces, ["eth0"]);
    assert_eq!(stats.network_stats.bytes_sent, 4_096);
    assert_eq!(stats.network_stats.bytes_recv, 8_192);
    assert_eq!(stats.array_status.total_capacity, 3000);
    assert_eq!(stats.array_status.used_space, 1300);
    assert_eq!(stats.array_status.state, ArrayState::Started);
    assert_eq!(stats.array_status.protection, Protection::Protected);
    assert_eq!(stats.disk_stats.len(), 2);
    assert_eq!(stats.uptime, Duration::from_secs(3_600));
    assert_eq!(stats.platform, "slackware");
}

#[test]
fn identity_file_name_wins_over_os_hostname() {
    let root = tempfile::TempDir::new().unwrap();
    write_file(root.path(), "boot/config/ident.cfg", "NAME=\"Tower\"\nCOMMENT=\"\"\n");
    let diag = Arc::new(RecordingDiagnostics::new());

    let stats = builder(root.path(), FakeMetrics::default(), FixedUsage::new(), diag)
        .build()
        .unwrap();

    assert_eq!(stats.hostname, "Tower");
}

#[test]
fn identity_file_backs_up_missing_os_hostname() {
    let root = tempfile::TempDir::new().unwrap();
    write_file(root.path(), "boot/config/ident.cfg", "NAME=Tower\n");
    let metrics = FakeMetrics {
        hostname: None,
        ..FakeMetrics::default()
    };
    let diag = Arc::new(RecordingDiagnostics::new());

    let stats = builder(root.path(), metrics, FixedUsage::new(), diag)
        .build()
        .unwrap();

    assert_eq!(stats.hostname, "Tower");
}

#[test]
fn missing_hostname_is_fatal() {
    let root = tempfile::TempDir::new().unwrap();
    let metrics = FakeMetrics {
        hostname: None,
        ..FakeMetrics::default()
    };
    let diag = Arc::new(RecordingDiagnostics::new());

    let err = builder(root.path(), metrics, FixedUsage::new(), diag)
        .build()
        .unwrap_err();

    assert!(matches!(err, SnapshotError::Hostname));
}

#[test]
fn cpu_memory_and_host_failures_are_fatal() {
    let root = tempfile::TempDir::new().unwrap();
    let cases = [
        (
            FakeMetrics {
                cpu: Err("sampling failed".into()),
                ..FakeMetrics::default()
            },
            "cpu",
        ),
        (
            FakeMetrics {
                memory_ok: false,
                ..FakeMetrics::default()
            },
            "memory",
        ),
        (
            FakeMetrics {
                host_ok: false,
                ..FakeMetrics::default()
            },
            "host info",
        ),
    ];
    for (metrics, needle) in cases {
        let diag = Arc::new(RecordingDiagnostics::new());
        let err = builder(root.path(), metrics, FixedUsage::new(), diag)
            .build()
            .unwrap_err();
        assert!(
            err.to_string().contains(needle),
            "expected '{needle}' in '{err}'"
        );
    }
}

#[test]
fn optional_sources_degrade_with_warnings() {
    let root = tempfile::TempDir::new().unwrap();
    let metrics = FakeMetrics {
        network: Err("netlink unavailable".into()),
        load: None,
        ..FakeMetrics::default()
    };
    let diag = Arc::new(RecordingDiagnostics::new());

    let stats = builder(root.path(), metrics, FixedUsage::new(), diag.clone())
        .build()
        .unwrap();

    assert_eq!(stats.cpu_temp, 0.0);
    assert!(stats.load_average.is_empty());
    assert_eq!(stats.network_stats.bytes_sent, 0);
    assert_eq!(stats.network_stats.bytes_recv, 0);
    assert!(stats.network_stats.interfaces.is_empty());
    assert!(stats.disk_stats.is_empty());
    assert_eq!(stats.array_status.state, ArrayState::Stopped);
    assert!(diag.contains("snapshot", "cpu temperature unavailable"));
    assert!(diag.contains("snapshot", "netlink unavailable"));
    assert!(diag.contains("array_resolver", "no disk source found"));
}

#[test]
fn unreadable_disk_does_not_fail_snapshot() {
    let root = tempfile::TempDir::new().unwrap();
    write_file(
        root.path(),
        "var/local/emhttp/disks.ini",
        "[disk1]\ndevice=/dev/sdb1\n[cache]\ndevice=/dev/sdc1\n",
    );
    let usage = FixedUsage::new().with("/dev/sdc1", 256, 50);
    let diag = Arc::new(RecordingDiagnostics::new());

    let stats = builder(root.path(), FakeMetrics::default(), usage, diag.clone())
        .build()
        .unwrap();

    assert_eq!(stats.disk_stats.len(), 1);
    assert_eq!(stats.disk_stats[0].name, "cache");
    assert_eq!(stats.array_status.cache_size, 256);
    assert!(diag.contains("disk_enumerator", "disk1"));
}

#[tokio::test]
async fn collect_returns_snapshot() {
    let root = tempfile::TempDir::new().unwrap();
    let diag = Arc::new(RecordingDiagnostics::new());
    let builder = Arc::new(builder(
        root.path(),
        FakeMetrics::default(),
        FixedUsage::new(),
        diag,
    ));

    let stats = builder.collect().await.unwrap();
    assert_eq!(stats.hostname, "os-host");
}

#[tokio::test]
async fn collect_times_out_on_slow_provider() {
    let root = tempfile::TempDir::new().unwrap();
    let prober = PathProber::new([root.path()]);
    let metrics = FakeMetrics {
        cpu_delay: Duration::from_millis(500),
        ..FakeMetrics::default()
    };
    let builder = Arc::new(SnapshotBuilder::new(
        Arc::new(metrics),
        ArrayResolver::new(prober.clone(), Arc::new(FixedUsage::new()), 4),
        prober,
        Arc::new(RecordingDiagnostics::new()),
        SnapshotConfig {
            cpu_sample: Duration::from_millis(10),
            timeout: Duration::from_millis(50),
            ..SnapshotConfig::default()
        },
    ));

    let err = builder.collect().await.unwrap_err();
    assert!(matches!(err, SnapshotError::Timeout(d) if d == Duration::from_millis(50)));
}

#[tokio::test]
async fn stalled_collections_are_capped() {
    let root = tempfile::TempDir::new().unwrap();
    let prober = PathProber::new([root.path()]);
    let metrics = FakeMetrics {
        cpu_delay: Duration::from_millis(300),
        ..FakeMetrics::default()
    };
    let builder = Arc::new(SnapshotBuilder::new(
        Arc::new(metrics),
        ArrayResolver::new(prober.clone(), Arc::new(FixedUsage::new()), 4),
        prober,
        Arc::new(RecordingDiagnostics::new()),
        SnapshotConfig {
            cpu_sample: Duration::from_millis(10),
            timeout: Duration::from_millis(50),
            max_pending: 1,
            ..SnapshotConfig::default()
        },
    ));

    let first = builder.clone().collect().await.unwrap_err();
    assert!(matches!(first, SnapshotError::Timeout(_)));

    // The timed-out sampler still holds the only slot.
    let second = builder.clone().collect().await.unwrap_err();
    assert!(matches!(second, SnapshotError::Busy(1)));

    tokio::time::sleep(Duration::from_millis(600)).await;
    let third = builder.collect().await.unwrap_err();
    assert!(matches!(third, SnapshotError::Timeout(_)));
}
