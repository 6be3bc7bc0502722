//! # Proof Verification Benchmarks
//!
//! | Path | Work per call |
//! |------|---------------|
//! | storage proof | one trie walk, depth ≤ 64 nibbles |
//! | query proof | one account walk plus one walk per slot |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shared_types::{keccak256, Address, OracleResponse, H256, U256};
use std::time::Duration;
use xq_01_proof_verifier::{verify_storage_proof, AccountState, ProofTrie};
use xq_02_light_client::{assemble_proof_group, verify_query_proof, ApprovedStateRoots};

const CHAIN: u32 = 5;
const HEIGHT: u64 = 1_000;

fn populated_storage(slots: u64) -> ProofTrie {
    let mut storage = ProofTrie::new();
    for n in 0..slots {
        storage.insert_storage(&H256::from_low_u64_be(n), &(n + 1).to_be_bytes());
    }
    storage
}

fn bench_storage_proof(c: &mut Criterion) {
    let mut group = c.benchmark_group("xq-01-storage-proof");
    group.measurement_time(Duration::from_secs(5));

    for size in [16u64, 256, 4_096] {
        let storage = populated_storage(size);
        let root = storage.root();
        let slot = H256::from_low_u64_be(size / 2);
        let path = keccak256(slot.as_bytes());
        let proof = storage.storage_proof(&slot);

        group.bench_with_input(BenchmarkId::new("verify", size), &size, |b, _| {
            b.iter(|| black_box(verify_storage_proof(&root, &path, &proof).is_ok()))
        });
    }
    group.finish();
}

fn bench_query_proof(c: &mut Criterion) {
    let mut group = c.benchmark_group("xq-02-query-proof");
    group.measurement_time(Duration::from_secs(5));

    let target = Address::repeat_byte(0xaa);
    let storage = populated_storage(1_024);
    let mut accounts = ProofTrie::new();
    accounts.insert_account(&target, &AccountState::with_storage_root(storage.root()));
    for n in 0..256u64 {
        accounts.insert_account(&Address::from_low_u64_be(n), &AccountState::default());
    }
    let mut roots = ApprovedStateRoots::new();
    roots.approve(&OracleResponse {
        dst_chain_id: CHAIN,
        height: U256::from(HEIGHT),
        root: accounts.root(),
    });

    for batch in [1u64, 10, 100] {
        let slots: Vec<H256> = (0..batch).map(H256::from_low_u64_be).collect();
        let groups = vec![assemble_proof_group(
            CHAIN,
            U256::from(HEIGHT),
            &accounts,
            target,
            &storage,
            &slots,
        )];

        group.throughput(Throughput::Elements(batch));
        group.bench_with_input(BenchmarkId::new("verify_batch", batch), &batch, |b, _| {
            b.iter(|| black_box(verify_query_proof(&roots, &groups).is_ok()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_storage_proof, bench_query_proof);
criterion_main!(benches);
