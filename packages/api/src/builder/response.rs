//! Response stage and the execution capability shared by every stage that can send
//!
//! [`ResponseReceiving`] is implemented by the verb builders, the body stage
//! and [`ResponseStage`]. Execution consumes the stage, so a chain runs at
//! most once and nothing can touch its request afterwards.

use std::fmt;
use std::marker::PhantomData;

use restchain_client::{ResponseResult, Result};
use serde::de::DeserializeOwned;

use crate::builder::core::{Exchange, HttpVerb, Request, ReturnsBody, sealed};
use crate::builder::headers::HeaderStage;

/// A stage from which the chain can be executed.
///
/// This trait is sealed; the stages of this crate are its only implementors.
pub trait ResponseReceiving: sealed::Sealed + Sized {
    /// The chain's HTTP verb.
    type Verb: HttpVerb;

    #[doc(hidden)]
    fn exchange(&self) -> &Exchange;

    #[doc(hidden)]
    fn exchange_mut(&mut self) -> &mut Exchange;

    #[doc(hidden)]
    fn into_exchange(self) -> Exchange;

    /// Stop building and move to the response stage.
    #[must_use]
    fn receive(self) -> ResponseStage<Self::Verb> {
        ResponseStage::new(self.into_exchange())
    }

    /// Validate, freeze and send the request, blocking until the transport answers.
    ///
    /// # Errors
    ///
    /// An invalid-request error when the target is missing or something
    /// recorded while building was invalid; the transport is not called in
    /// that case. Otherwise whatever the transport returned.
    fn execute(self) -> Result<ResponseResult> {
        self.into_exchange().run()
    }

    /// Same as [`execute`](Self::execute).
    fn a_response_entity(self) -> Result<ResponseResult> {
        self.execute()
    }

    /// Execute and discard the response.
    fn ignoring_response(self) -> Result<()> {
        self.execute().map(drop)
    }
}

/// Execution that decodes the JSON response body, for verbs whose responses have one.
pub trait ObjectReceiving: ResponseReceiving<Verb: ReturnsBody> {
    /// Execute and deserialize the JSON body into `T`.
    ///
    /// # Errors
    ///
    /// As [`ResponseReceiving::execute`], plus a decode error when the body
    /// is not JSON shaped like `T`.
    fn an_object<T: DeserializeOwned>(self) -> Result<T> {
        self.execute()?.json()
    }
}

impl<S> ObjectReceiving for S where S: ResponseReceiving<Verb: ReturnsBody> {}

/// Terminal stage: only header setting and execution remain.
pub struct ResponseStage<V> {
    exchange: Exchange,
    _verb: PhantomData<V>,
}

impl<V: HttpVerb> ResponseStage<V> {
    pub(crate) fn new(exchange: Exchange) -> Self {
        ResponseStage {
            exchange,
            _verb: PhantomData,
        }
    }

    /// Set more headers before executing.
    #[must_use]
    pub fn with_headers(self) -> HeaderStage<Self> {
        HeaderStage::new(self)
    }
}

impl<V> sealed::Sealed for ResponseStage<V> {}

impl<V: HttpVerb> ResponseReceiving for ResponseStage<V> {
    type Verb = V;

    fn exchange(&self) -> &Exchange {
        &self.exchange
    }

    fn exchange_mut(&mut self) -> &mut Exchange {
        &mut self.exchange
    }

    fn into_exchange(self) -> Exchange {
        self.exchange
    }
}

impl<V> fmt::Debug for ResponseStage<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseStage")
            .field("exchange", &self.exchange)
            .finish()
    }
}

impl<V: HttpVerb, B> ResponseReceiving for Request<V, B> {
    type Verb = V;

    fn exchange(&self) -> &Exchange {
        &self.exchange
    }

    fn exchange_mut(&mut self) -> &mut Exchange {
        &mut self.exchange
    }

    fn into_exchange(self) -> Exchange {
        self.exchange
    }
}
