//! # End-to-End Query Flows
//!
//! Every scenario runs against a fully wired [`ServiceContainer`]: the
//! ledger, both light clients, the in-memory oracle queues and the bus.
//! Proofs come from a real [`ProofTrie`], so verification is genuine.
//!
//! ```text
//! submit ──► oracle queue ──► fulfil (root approved)
//!                                   │
//! relayer ──► deliver_proof ──► verify ──► cache ──► receiver
//! ```

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use shared_bus::{EventFilter, GatewayEvent, Subscription};
    use shared_types::{
        cache_key, query_id, Address, ErrorKind, OracleResponse, QueryId, QueryStatus, SubQuery,
        H256, U256,
    };
    use xq_01_proof_verifier::{AccountState, ProofTrie};
    use xq_02_light_client::{
        assemble_proof_group, encode_compute_response, LightClient, LightClientError,
        NodeOperatorConfig, QueryProof,
    };
    use xq_03_query_gateway::{GatewayError, MockReceiver, QueryGatewayApi, QuerySubmission};
    use xq_node::{NodeConfig, ServiceContainer};

    const CHAIN: u32 = 5;
    const HEIGHT: u64 = 1_000;
    const RELAYER: u64 = 0x7e;
    const USER: u64 = 0x05;

    fn addr(n: u64) -> Address {
        Address::from_low_u64_be(n)
    }

    fn slot(n: u64) -> H256 {
        H256::from_low_u64_be(n)
    }

    fn word(last: u8) -> Vec<u8> {
        let mut w = vec![0u8; 32];
        w[31] = last;
        w
    }

    /// A value longer than one word that starts with zero bytes.
    fn padded_long_value() -> Vec<u8> {
        let mut value = vec![0x00, 0x00];
        value.extend_from_slice(&[0x77; 38]);
        value
    }

    fn encoded_proof(
        accounts: &ProofTrie,
        storage: &ProofTrie,
        target: Address,
        height: u64,
        slots: &[H256],
    ) -> Vec<u8> {
        QueryProof::new(vec![assemble_proof_group(
            CHAIN,
            U256::from(height),
            accounts,
            target,
            storage,
            slots,
        )])
        .encode()
    }

    /// Remote ledger state plus a wired node.
    struct World {
        node: ServiceContainer,
        events: Subscription,
        accounts: ProofTrie,
        storage: ProofTrie,
        target: Address,
    }

    impl World {
        fn new() -> Self {
            let mut config = NodeConfig::default();
            config.gateway.protocol_fee = U256::from(5);
            config.node_operator = NodeOperatorConfig::for_testing();
            config.runtime.gas_price = U256::from(2);
            config.relayers = vec![addr(RELAYER)];
            let node = ServiceContainer::new(config).unwrap();
            let events = node.bus.subscribe(EventFilter::all());

            let target = Address::repeat_byte(0xaa);
            let mut storage = ProofTrie::new();
            storage.insert_storage(&slot(1), &[0x2a]);
            storage.insert_storage(&slot(2), &[0x11; 40]);
            storage.insert_storage(&slot(3), &padded_long_value());
            let mut accounts = ProofTrie::new();
            accounts.insert_account(&target, &AccountState::with_storage_root(storage.root()));
            accounts.insert_account(&Address::repeat_byte(0xbb), &AccountState::default());

            Self {
                node,
                events,
                accounts,
                storage,
                target,
            }
        }

        fn queries(&self, slots: &[u64]) -> Vec<SubQuery> {
            slots
                .iter()
                .map(|n| SubQuery::new(CHAIN, self.target, U256::from(HEIGHT), slot(*n)))
                .collect()
        }

        fn submission(&self, light_client: Address, slots: &[u64], fee: u64) -> QuerySubmission {
            QuerySubmission {
                submitter: addr(USER),
                queries: self.queries(slots),
                light_client,
                callback: self.node.config.principals.receiver,
                message: b"ping".to_vec(),
                fee: U256::from(fee),
            }
        }

        fn submit_push(&self, slots: &[u64]) -> QueryId {
            let submission = self.submission(self.node.config.principals.push_compute, slots, 5);
            self.node.ledger.write().submit_query(submission).unwrap()
        }

        /// Answer every queued compute job with `root`.
        fn answer_compute_jobs(&self, root: H256) {
            let oracle = self.node.config.principals.push_compute_oracle;
            for job in self.node.compute_oracle.drain_jobs() {
                let responses: Vec<OracleResponse> = job
                    .requests
                    .iter()
                    .map(|r| OracleResponse {
                        dst_chain_id: r.dst_chain_id,
                        height: r.height,
                        root,
                    })
                    .collect();
                self.node
                    .push_compute
                    .write()
                    .fulfill(oracle, job.request_id, &encode_compute_response(&responses))
                    .unwrap();
            }
        }

        fn proof(&self, slots: &[u64]) -> Vec<u8> {
            let slots: Vec<H256> = slots.iter().map(|n| slot(*n)).collect();
            encoded_proof(&self.accounts, &self.storage, self.target, HEIGHT, &slots)
        }

        /// Submit one slot at `height` through push-compute.
        fn submit_at(&self, height: u64, n: u64) -> QueryId {
            let mut submission = self.submission(self.node.config.principals.push_compute, &[n], 5);
            submission.queries = vec![SubQuery::new(CHAIN, self.target, U256::from(height), slot(n))];
            self.node.ledger.write().submit_query(submission).unwrap()
        }

        fn deliver(&self, id: QueryId, proof: &[u8]) -> Result<Vec<Vec<u8>>, GatewayError> {
            self.node
                .ledger
                .write()
                .deliver_proof(addr(RELAYER), id, proof)
                .map(|report| report.values)
        }

        fn drain_events(&mut self) -> Vec<GatewayEvent> {
            self.events.drain()
        }
    }

    #[test]
    fn test_push_compute_round_trip() {
        let mut world = World::new();
        let id = world.submit_push(&[1, 2]);
        assert_eq!(world.node.compute_oracle.queued(), 1);

        world.answer_compute_jobs(world.accounts.root());
        world.drain_events();

        let values = world.deliver(id, &world.proof(&[1, 2])).unwrap();
        assert_eq!(values, vec![word(0x2a), vec![0x11; 40]]);
        assert_eq!(
            world.node.ledger.read().query_status(&id).unwrap(),
            QueryStatus::Done
        );
        assert_eq!(world.node.receiver.result(&id), Some(values.clone()));

        let events = world.drain_events();
        let saved = events
            .iter()
            .filter(|e| matches!(e, GatewayEvent::QueryDataSaved { .. }))
            .count();
        assert_eq!(saved, 2);
        assert!(matches!(
            events.last(),
            Some(GatewayEvent::QueryCompleted { query_id, values: v, .. })
                if *query_id == id && *v == values
        ));

        let cached = world
            .node
            .ledger
            .read()
            .get_cache(&world.queries(&[1, 2]))
            .unwrap();
        assert_eq!(cached, values);
    }

    #[test]
    fn test_node_operator_flow_charges_fees() {
        let mut world = World::new();
        let principals = world.node.config.principals.clone();
        let owner = world.node.config.gateway.owner;
        world
            .node
            .node_operator
            .write()
            .add_to_whitelist(owner, &[addr(USER)])
            .unwrap();

        // (2 × 10 + 100) × 2 + 1000 + protocol fee 5
        let required = world
            .node
            .ledger
            .read()
            .estimate_fee(principals.node_operator, &world.queries(&[1, 2]))
            .unwrap();
        assert_eq!(required, U256::from(1_245));

        let short = world.submission(principals.node_operator, &[1, 2], 1_244);
        assert!(matches!(
            world.node.ledger.write().submit_query(short),
            Err(GatewayError::InsufficientFee { .. })
        ));

        let submission = world.submission(principals.node_operator, &[1, 2], 1_245);
        let id = world.node.ledger.write().submit_query(submission).unwrap();
        assert_eq!(world.node.ledger.read().collected_fees(), U256::from(1_245));
        assert_eq!(
            world.node.node_operator.read().oracle_budget(),
            U256::from(1_000_000 - 1_000)
        );

        let job = world.node.operator_oracle.drain_jobs().remove(0);
        world
            .node
            .node_operator
            .write()
            .fulfill(
                principals.node_operator_oracle,
                job.request_id,
                &[OracleResponse {
                    dst_chain_id: CHAIN,
                    height: U256::from(HEIGHT),
                    root: world.accounts.root(),
                }],
            )
            .unwrap();

        let values = world.deliver(id, &world.proof(&[1, 2])).unwrap();
        assert_eq!(values[0], word(0x2a));
        assert!(world
            .drain_events()
            .iter()
            .any(|e| matches!(e, GatewayEvent::QueryCompleted { query_id, .. } if *query_id == id)));
    }

    #[test]
    fn test_non_whitelisted_submitter_changes_nothing() {
        let mut world = World::new();
        world.drain_events();
        let submission = world.submission(world.node.config.principals.node_operator, &[1], 10_000);

        let err = world.node.ledger.write().submit_query(submission).unwrap_err();
        assert_eq!(
            err,
            GatewayError::LightClient(LightClientError::NotWhitelisted { origin: addr(USER) })
        );
        assert_eq!(err.kind(), ErrorKind::Authorization);

        let ledger = world.node.ledger.read();
        assert_eq!(ledger.nonce(), 0);
        assert_eq!(ledger.collected_fees(), U256::zero());
        assert_eq!(world.node.operator_oracle.queued(), 0);
        drop(ledger);
        assert!(!world
            .drain_events()
            .iter()
            .any(|e| matches!(e, GatewayEvent::QuerySent { .. })));
    }

    #[test]
    fn test_wrong_root_rejected_then_retry_succeeds() {
        let world = World::new();
        let id = world.submit_push(&[1]);
        world.answer_compute_jobs(H256::repeat_byte(0xee));

        let err = world.deliver(id, &world.proof(&[1])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Proof);
        assert_eq!(
            world.node.ledger.read().query_status(&id).unwrap(),
            QueryStatus::Pending
        );
        assert!(world.node.receiver.is_empty());

        // A later header update corrects the root; the same proof now passes.
        let oracle = world.node.config.principals.push_compute_oracle;
        world
            .node
            .push_compute
            .write()
            .update_header(
                oracle,
                &[OracleResponse {
                    dst_chain_id: CHAIN,
                    height: U256::from(HEIGHT),
                    root: world.accounts.root(),
                }],
            )
            .unwrap();
        assert_eq!(world.deliver(id, &world.proof(&[1])).unwrap(), vec![word(0x2a)]);
    }

    #[test]
    fn test_second_delivery_is_rejected() {
        let world = World::new();
        let id = world.submit_push(&[1]);
        world.answer_compute_jobs(world.accounts.root());
        world.deliver(id, &world.proof(&[1])).unwrap();

        let err = world.deliver(id, &world.proof(&[1])).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidStatus { .. }));
        assert_eq!(err.kind(), ErrorKind::State);
        assert_eq!(world.node.receiver.len(), 1);
    }

    #[test]
    fn test_absent_slot_delivers_empty_value() {
        let world = World::new();
        let id = world.submit_push(&[9]);
        world.answer_compute_jobs(world.accounts.root());

        assert_eq!(world.deliver(id, &world.proof(&[9])).unwrap(), vec![Vec::<u8>::new()]);
        let key = cache_key(CHAIN, &world.target, &slot(9));
        let ledger = world.node.ledger.read();
        let cached = ledger.cached(&key).unwrap();
        assert!(cached.value.is_empty());
        assert_eq!(cached.height, U256::from(HEIGHT));
    }

    #[test]
    fn test_unauthorized_relayer_rejected() {
        let world = World::new();
        let id = world.submit_push(&[1]);
        world.answer_compute_jobs(world.accounts.root());

        let err = world
            .node
            .ledger
            .write()
            .deliver_proof(addr(0xbad), id, &world.proof(&[1]))
            .unwrap_err();
        assert_eq!(err, GatewayError::NotRelayer { caller: addr(0xbad) });
        assert_eq!(
            world.node.ledger.read().query_status(&id).unwrap(),
            QueryStatus::Pending
        );
    }

    #[test]
    fn test_failing_receiver_still_completes_query() {
        let mut world = World::new();
        let failing = Arc::new(MockReceiver::failing("out of gas"));
        world
            .node
            .ledger
            .write()
            .register_receiver(addr(0xfa), failing.clone());

        let mut submission = world.submission(world.node.config.principals.push_compute, &[1], 5);
        submission.callback = addr(0xfa);
        let id = world.node.ledger.write().submit_query(submission).unwrap();
        world.answer_compute_jobs(world.accounts.root());
        world.drain_events();

        world.deliver(id, &world.proof(&[1])).unwrap();
        assert_eq!(failing.calls(), 1);
        assert_eq!(
            world.node.ledger.read().query_status(&id).unwrap(),
            QueryStatus::Done
        );
        assert_eq!(
            world.node.ledger.read().get_cache(&world.queries(&[1])).unwrap(),
            vec![word(0x2a)]
        );

        let events = world.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GatewayEvent::ReceiverFailed { query_id, reason } if *query_id == id && reason.contains("out of gas")
        )));
        assert!(!events
            .iter()
            .any(|e| matches!(e, GatewayEvent::QueryCompleted { .. })));
    }

    #[test]
    fn test_cache_reflects_latest_delivery() {
        let world = World::new();
        let first = world.submit_push(&[1]);
        world.answer_compute_jobs(world.accounts.root());
        world.deliver(first, &world.proof(&[1])).unwrap();

        // Same slot, later height, new value.
        let mut storage = ProofTrie::new();
        storage.insert_storage(&slot(1), &[0x99]);
        let mut accounts = ProofTrie::new();
        accounts.insert_account(&world.target, &AccountState::with_storage_root(storage.root()));

        let later = HEIGHT + 10;
        let query = SubQuery::new(CHAIN, world.target, U256::from(later), slot(1));
        let mut submission = world.submission(world.node.config.principals.push_compute, &[1], 5);
        submission.queries = vec![query];
        let second = world.node.ledger.write().submit_query(submission).unwrap();
        world.answer_compute_jobs(accounts.root());

        let proof = encoded_proof(&accounts, &storage, world.target, later, &[slot(1)]);
        world.deliver(second, &proof).unwrap();

        let ledger = world.node.ledger.read();
        assert_eq!(ledger.get_cache(&[query]).unwrap(), vec![word(0x99)]);
        // The old height no longer matches; height zero returns the latest.
        assert_eq!(ledger.get_cache(&world.queries(&[1])).unwrap(), vec![Vec::<u8>::new()]);
        let any_height = SubQuery::new(CHAIN, world.target, U256::zero(), slot(1));
        assert_eq!(ledger.get_cache(&[any_height]).unwrap(), vec![word(0x99)]);
    }

    #[test]
    fn test_long_value_keeps_leading_zeros_end_to_end() {
        let world = World::new();
        let id = world.submit_push(&[3, 1]);
        world.answer_compute_jobs(world.accounts.root());

        let values = world.deliver(id, &world.proof(&[3, 1])).unwrap();
        assert_eq!(values[0], padded_long_value());
        assert_eq!(values[0].len(), 40);
        assert_eq!(values[1], word(0x2a));
        assert_eq!(world.node.receiver.result(&id), Some(values.clone()));
        assert_eq!(
            world.node.ledger.read().get_cache(&world.queries(&[3])).unwrap(),
            vec![padded_long_value()]
        );
    }

    #[test]
    fn test_older_height_delivered_last_wins() {
        let world = World::new();
        let later = HEIGHT + 10;

        let mut newer_storage = ProofTrie::new();
        newer_storage.insert_storage(&slot(1), &[0x99]);
        let mut newer_accounts = ProofTrie::new();
        newer_accounts.insert_account(
            &world.target,
            &AccountState::with_storage_root(newer_storage.root()),
        );

        // Newer height first.
        let newer = world.submit_at(later, 1);
        world.answer_compute_jobs(newer_accounts.root());
        let proof = encoded_proof(&newer_accounts, &newer_storage, world.target, later, &[slot(1)]);
        world.deliver(newer, &proof).unwrap();

        // Then the older height.
        let older = world.submit_at(HEIGHT, 1);
        world.answer_compute_jobs(world.accounts.root());
        world.deliver(older, &world.proof(&[1])).unwrap();

        let ledger = world.node.ledger.read();
        let latest = SubQuery::new(CHAIN, world.target, U256::zero(), slot(1));
        assert_eq!(ledger.get_cache(&[latest]).unwrap(), vec![word(0x2a)]);
        let cached = ledger.cached(&cache_key(CHAIN, &world.target, &slot(1))).unwrap();
        assert_eq!(cached.height, U256::from(HEIGHT));
        let at_later = SubQuery::new(CHAIN, world.target, U256::from(later), slot(1));
        assert_eq!(ledger.get_cache(&[at_later]).unwrap(), vec![Vec::<u8>::new()]);
    }

    #[tokio::test]
    async fn test_query_sent_reaches_subscribers() {
        let world = World::new();
        let mut sent = world.node.bus.subscribe(EventFilter::all());
        let id = world.submit_push(&[1, 2]);

        let event = tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                match sent.recv().await {
                    Some(event @ GatewayEvent::QuerySent { .. }) => return Some(event),
                    Some(_) => continue,
                    None => return None,
                }
            }
        })
        .await
        .unwrap()
        .unwrap();

        match event {
            GatewayEvent::QuerySent {
                query_id: sent_id,
                encoded_request,
                submitter,
                ..
            } => {
                assert_eq!(sent_id, id);
                assert_eq!(submitter, addr(USER));
                assert_eq!(query_id(&encoded_request, 0), id);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
}
