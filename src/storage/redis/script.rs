//! Lua scripting
//!
//! Scripts run via EVALSHA and are loaded on a NOSCRIPT miss. Keys passed to a
//! script are namespaced; arguments are forwarded untouched.

use super::store::{RedisStore, decode};
use crate::utils::error::Result;
use redis::{FromRedisValue, Script, ToRedisArgs};
use serde::de::DeserializeOwned;

impl RedisStore {
    /// Evaluate a Lua script and convert the reply
    pub async fn script_eval<T, A>(&self, script: &str, keys: &[&str], args: &[A]) -> Result<T>
    where
        T: FromRedisValue,
        A: ToRedisArgs,
    {
        self.script_run(&Script::new(script), keys, args).await
    }

    /// Evaluate a prepared script, reusing its cached hash
    pub async fn script_run<T, A>(&self, script: &Script, keys: &[&str], args: &[A]) -> Result<T>
    where
        T: FromRedisValue,
        A: ToRedisArgs,
    {
        let mut conn = self.get_connection().await?;
        let mut invocation = script.prepare_invoke();
        for key in keys {
            invocation.key(self.key(key));
        }
        for arg in args {
            invocation.arg(arg);
        }
        let reply: T = invocation.invoke_async(&mut conn).await?;
        Ok(reply)
    }

    /// Evaluate a script that returns a JSON string
    pub async fn script_eval_json<T, A>(
        &self,
        script: &str,
        keys: &[&str],
        args: &[A],
    ) -> Result<T>
    where
        T: DeserializeOwned,
        A: ToRedisArgs,
    {
        let raw: String = self.script_eval(script, keys, args).await?;
        decode(&raw)
    }
}
