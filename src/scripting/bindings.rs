use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::debug;
use mlua::{
    Lua, Result as LuaResult, Value as LuaValue, Variadic,
};

use crate::command::Dispatcher;
use crate::value::Value;

pub(super) struct ScriptContext {
    pub dispatcher: Arc<Dispatcher>,
    pub running: Arc<AtomicBool>,
}

pub(super) fn register_globals(lua: &Lua, context: &ScriptContext) -> LuaResult<()> {
    register_print(lua)?;
    register_wait(lua, Arc::clone(&context.running))?;
    register_commands(lua, context)?;
    Ok(())
}

fn register_print(lua: &Lua) -> LuaResult<()> {
    let print = lua.create_function(|lua, values: Variadic<LuaValue>| {
        let mut out = Vec::new();
        for value in values.iter() {
            let text = match value {
                LuaValue::Nil => "nil".to_string(),
                LuaValue::Boolean(b) => b.to_string(),
                LuaValue::String(s) => s.to_str()?.to_string(),
                _ => match lua.coerce_string(value.clone())? {
                    Some(s) => s.to_str()?.to_string(),
                    None => format!("{:?}", value),
                },
            };
            out.push(text);
        }
        println!("[script] {}", out.join("\t"));
        Ok(())
    })?;
    lua.globals().set("print", print)?;
    Ok(())
}

fn register_wait(lua: &Lua, running: Arc<AtomicBool>) -> LuaResult<()> {
    let wait = lua.create_function(move |_, millis: Option<u64>| {
        let mut remaining = millis.unwrap_or(0);
        if remaining == 0 {
            std::thread::yield_now();
            return Ok(());
        }
        const CHUNK: u64 = 10;
        while remaining > 0 {
            if !running.load(Ordering::Acquire) {
                return Err(mlua::Error::RuntimeError("wait interrupted".into()));
            }
            let sleep = remaining.min(CHUNK);
            std::thread::sleep(Duration::from_millis(sleep));
            remaining -= sleep;
        }
        Ok(())
    })?;
    lua.globals().set("wait", wait)?;
    Ok(())
}

/// Exposes every catalogue command to Lua, both as a global function
/// and under the `commands` table. Names that would shadow a Lua
/// built-in (`type`) stay table-only.
fn register_commands(lua: &Lua, context: &ScriptContext) -> LuaResult<()> {
    let globals = lua.globals();
    let table = lua.create_table()?;

    for spec in crate::command::commands() {
        let dispatcher = Arc::clone(&context.dispatcher);
        let name = spec.name;
        let function = lua.create_function(move |lua, args: Variadic<LuaValue>| {
            let mut values = Vec::with_capacity(args.len());
            for arg in args.iter() {
                values.push(lua_to_value(arg)?);
            }
            let result = dispatcher
                .dispatch(name, &values)
                .map_err(mlua::Error::external)?;
            value_to_lua(lua, result)
        })?;
        table.set(name, function.clone())?;
        if globals.contains_key(name)? {
            debug!("command `{name}` shadows a Lua global; table access only");
        } else {
            globals.set(name, function)?;
        }
    }

    globals.set("commands", table)?;
    Ok(())
}

fn lua_to_value(value: &LuaValue) -> LuaResult<Value> {
    let converted = match value {
        LuaValue::Nil => Value::Nil,
        LuaValue::Boolean(b) => Value::Bool(*b),
        LuaValue::Integer(i) => Value::Int(*i),
        LuaValue::Number(n) => Value::Num(*n),
        LuaValue::String(s) => Value::Str(s.to_str()?.to_string()),
        LuaValue::Table(table) => {
            let mut items = Vec::new();
            for item in table.clone().sequence_values::<LuaValue>() {
                items.push(lua_to_value(&item?)?);
            }
            Value::List(items)
        }
        other => {
            return Err(mlua::Error::FromLuaConversionError {
                from: other.type_name(),
                to: "command argument",
                message: Some("expected nil, boolean, number, string or table".into()),
            })
        }
    };
    Ok(converted)
}

fn value_to_lua(lua: &Lua, value: Value) -> LuaResult<LuaValue> {
    let converted = match value {
        Value::Nil => LuaValue::Nil,
        Value::Bool(b) => LuaValue::Boolean(b),
        Value::Int(i) => LuaValue::Integer(i),
        Value::Num(n) => LuaValue::Number(n),
        Value::Str(s) => LuaValue::String(lua.create_string(&s)?),
        Value::List(items) => {
            let table = lua.create_table_with_capacity(items.len(), 0)?;
            for (index, item) in items.into_iter().enumerate() {
                table.set(index + 1, value_to_lua(lua, item)?)?;
            }
            LuaValue::Table(table)
        }
    };
    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Entity, EntityClass, EntityRef};
    use crate::session::Session;

    fn script_context(session: Session) -> ScriptContext {
        ScriptContext {
            dispatcher: Arc::new(Dispatcher::headless(session)),
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    #[test]
    fn commands_are_reachable_as_globals() {
        let session = Session::new();
        session.entities().insert(Entity::new(EntityClass::Unit, 1));
        let lua = Lua::new();
        register_globals(&lua, &script_context(session.clone())).unwrap();

        let health: f64 = lua
            .load(
                r#"
                heal(1, 1, 25)
                sethour(14)
                find(23, 3)
                return health(1, 1)
            "#,
            )
            .eval()
            .unwrap();

        assert_eq!(health, 25.0);
        assert_eq!(session.clock().hour(), 14);
        assert_eq!(session.player().item_amount(23), 3);
    }

    #[test]
    fn colliding_names_stay_on_the_commands_table() {
        let lua = Lua::new();
        register_globals(&lua, &script_context(Session::new())).unwrap();

        // Lua's own `type` must survive; the command is still callable
        // through the table (and inert, as a placeholder).
        let (lua_type, via_table): (String, LuaValue) = lua
            .load(
                r#"
                return type("palm"), commands.type(1, 1)
            "#,
            )
            .eval()
            .unwrap();
        assert_eq!(lua_type, "string");
        assert!(matches!(via_table, LuaValue::Nil));
    }

    #[test]
    fn lists_cross_the_boundary() {
        let lua = Lua::new();
        register_globals(&lua, &script_context(Session::new())).unwrap();

        let joined: String = lua
            .load(r#"return join({1, "x", 2})"#)
            .eval()
            .unwrap();
        assert_eq!(joined, "1,x,2");
    }

    #[test]
    fn dispatch_errors_become_script_errors() {
        let lua = Lua::new();
        register_globals(&lua, &script_context(Session::new())).unwrap();

        let (ok, message): (bool, String) = lua
            .load(
                r#"
                local success, err = pcall(function()
                    heal(1, 9999, 5)
                end)
                if success then
                    return true, ""
                else
                    return false, tostring(err)
                end
            "#,
            )
            .eval()
            .unwrap();
        assert!(!ok);
        assert!(message.contains("9999"));
    }

    #[test]
    fn wait_function_reports_stop_request() {
        let lua = Lua::new();
        let context = ScriptContext {
            dispatcher: Arc::new(Dispatcher::headless(Session::new())),
            running: Arc::new(AtomicBool::new(false)),
        };
        register_globals(&lua, &context).unwrap();

        let (ok, message): (bool, String) = lua
            .load(
                r#"
                local success, err = pcall(function()
                    wait(20)
                end)
                if success then
                    return true, ""
                else
                    return false, tostring(err)
                end
            "#,
            )
            .eval()
            .unwrap();

        assert!(!ok);
        assert!(message.contains("wait interrupted"));
    }

    #[test]
    fn entity_state_round_trips_through_lua() {
        let session = Session::new();
        session.entities().insert(Entity::new(EntityClass::Object, 2));
        let lua = Lua::new();
        register_globals(&lua, &script_context(session.clone())).unwrap();

        let count: i64 = lua
            .load(
                r#"
                addstate(0, 2, 4)
                addstate(0, 2, 4)
                return count_state(4)
            "#,
            )
            .eval()
            .unwrap();
        assert_eq!(count, 1);

        let object = session
            .entities()
            .lookup(EntityRef::new(EntityClass::Object, 2))
            .unwrap();
        assert_eq!(object.states.len(), 1);
    }
}
