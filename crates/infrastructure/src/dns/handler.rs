use super::errors::ServerError;
use super::resolver::QueryResolver;
use hickory_proto::op::{Message, MessageType, OpCode, ResponseCode};
use hickory_proto::rr::Name;
use rrdns_domain::suffix_zone;
use std::str::FromStr;
use tracing::debug;

/// Answers requests for names under one zone.
pub struct RoundRobinHandler {
    zone: Name,
    resolver: QueryResolver,
}

impl RoundRobinHandler {
    /// `suffix` is the zone without its trailing dot, e.g. `"svc.example"`.
    pub fn new(suffix: &str, resolver: QueryResolver) -> Result<Self, ServerError> {
        let zone = Name::from_str(&suffix_zone(suffix)).map_err(|e| ServerError::InvalidSuffix {
            suffix: suffix.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { zone, resolver })
    }

    pub fn zone(&self) -> &Name {
        &self.zone
    }

    /// Build the reply to `request`.
    ///
    /// The reply is authoritative and echoes the id, opcode, questions and
    /// the RD and CD flags. Only standard queries are resolved; any other opcode gets an
    /// empty reply. A standard query whose first question lies outside the
    /// zone, or that has no question at all, is REFUSED.
    pub fn handle(&self, request: &Message) -> Message {
        let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
        response.set_authoritative(true);
        response.set_recursion_desired(request.recursion_desired());
        response.set_checking_disabled(request.checking_disabled());
        for query in request.queries() {
            response.add_query(query.clone());
        }

        if request.op_code() != OpCode::Query {
            debug!(id = request.id(), op_code = ?request.op_code(), "Non-query opcode, empty reply");
            return response;
        }

        if !self.in_zone(request) {
            debug!(id = request.id(), zone = %self.zone, "Query outside zone, refusing");
            response.set_response_code(ResponseCode::Refused);
            return response;
        }

        for query in request.queries() {
            for record in self.resolver.resolve(query) {
                response.add_answer(record);
            }
        }

        response
    }

    fn in_zone(&self, request: &Message) -> bool {
        request
            .queries()
            .first()
            .map(|query| self.zone.zone_of(query.name()))
            .unwrap_or(false)
    }
}
